//! Tests for the position service: slug assignment with collision retry,
//! duplicate detection, and write-path normalization.

#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Result};
    use crate::positions::{
        NewPosition, Position, PositionRepositoryTrait, PositionService, PositionServiceTrait,
        PositionUpdate, SlugGenerator, TransactionKind, TransactionRecord, SLUG_LENGTH,
        SLUG_MAX_ATTEMPTS,
    };
    use crate::Error;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    /// In-memory repository enforcing the same uniqueness rules (and error
    /// messages) as the SQLite store.
    #[derive(Default)]
    struct MockPositionRepository {
        positions: Mutex<Vec<Position>>,
        /// Number of create calls that should fail with a slug collision
        /// before succeeding.
        forced_slug_collisions: AtomicU32,
        create_calls: AtomicU32,
    }

    impl MockPositionRepository {
        fn new() -> Self {
            Self::default()
        }

        fn with_forced_slug_collisions(collisions: u32) -> Self {
            let repo = Self::default();
            repo.forced_slug_collisions.store(collisions, Ordering::SeqCst);
            repo
        }

        fn count(&self) -> usize {
            self.positions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PositionRepositoryTrait for MockPositionRepository {
        async fn create(&self, new_position: NewPosition, slug: String) -> Result<Position> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);

            if self.forced_slug_collisions.load(Ordering::SeqCst) > 0 {
                self.forced_slug_collisions.fetch_sub(1, Ordering::SeqCst);
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: positions.slug".to_string(),
                )));
            }

            let mut positions = self.positions.lock().unwrap();
            if positions.iter().any(|p| p.slug == slug) {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: positions.slug".to_string(),
                )));
            }
            if positions.iter().any(|p| {
                p.user_id == new_position.user_id
                    && p.name == new_position.name
                    && p.category_id == new_position.category_id
            }) {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: positions.user_id, positions.name, positions.category_id"
                        .to_string(),
                )));
            }

            let (quantity, cost_basis, market_value, _) = new_position.normalized_valuation();
            let position = Position {
                id: format!("pos-{}", positions.len() + 1),
                user_id: new_position.user_id,
                category_id: new_position.category_id,
                name: new_position.name,
                slug,
                quantity,
                cost_basis,
                market_value,
                transaction_log: new_position.transaction_log,
                ..Default::default()
            };
            positions.push(position.clone());
            Ok(position)
        }

        async fn update(&self, update: PositionUpdate) -> Result<Position> {
            let (quantity, cost_basis, market_value, _) = update.normalized_valuation();
            let mut positions = self.positions.lock().unwrap();
            let position = positions
                .iter_mut()
                .find(|p| p.id == update.id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(update.id.clone()))
                })?;
            position.quantity = quantity;
            position.cost_basis = cost_basis;
            position.market_value = market_value;
            Ok(position.clone())
        }

        async fn record_transaction(
            &self,
            position_id: &str,
            record: TransactionRecord,
        ) -> Result<Position> {
            let mut positions = self.positions.lock().unwrap();
            let position = positions
                .iter_mut()
                .find(|p| p.id == position_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(position_id.to_string()))
                })?;
            position.apply_transaction(record);
            Ok(position.clone())
        }

        async fn delete(&self, position_id: &str) -> Result<usize> {
            let mut positions = self.positions.lock().unwrap();
            let before = positions.len();
            positions.retain(|p| p.id != position_id);
            Ok(before - positions.len())
        }

        async fn delete_by_user(&self, user_id: &str) -> Result<usize> {
            let mut positions = self.positions.lock().unwrap();
            let before = positions.len();
            positions.retain(|p| p.user_id != user_id);
            Ok(before - positions.len())
        }

        fn get_by_id(&self, position_id: &str) -> Result<Position> {
            self.positions
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == position_id)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(position_id.to_string())))
        }

        fn find_by_slug(&self, slug: &str) -> Result<Option<Position>> {
            Ok(self
                .positions
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.slug == slug)
                .cloned())
        }

        fn find_by_owner_name_category(
            &self,
            user_id: &str,
            name: &str,
            category_id: Option<&str>,
        ) -> Result<Option<Position>> {
            Ok(self
                .positions
                .lock()
                .unwrap()
                .iter()
                .find(|p| {
                    p.user_id == user_id
                        && p.name == name
                        && p.category_id.as_deref() == category_id
                })
                .cloned())
        }

        fn list_by_user(&self, user_id: &str) -> Result<Vec<Position>> {
            Ok(self
                .positions
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.user_id == user_id)
                .cloned()
                .collect())
        }

        fn list_by_category(&self, category_id: &str) -> Result<Vec<Position>> {
            Ok(self
                .positions
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.category_id.as_deref() == Some(category_id))
                .cloned()
                .collect())
        }
    }

    fn service(repository: Arc<MockPositionRepository>) -> PositionService {
        PositionService::new(repository, Arc::new(SlugGenerator::from_seed(42)))
    }

    fn new_position(name: &str) -> NewPosition {
        NewPosition {
            user_id: "user-1".to_string(),
            category_id: Some("cat-crypto".to_string()),
            name: name.to_string(),
            quantity: Some(dec!(0.40)),
            cost_basis: Some(dec!(15000.00)),
            market_value: Some(dec!(37500.00)),
            transaction_log: vec![TransactionRecord {
                kind: TransactionKind::Buy,
                quantity: dec!(0.40),
                price: dec!(37500.00),
                date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            }],
        }
    }

    #[tokio::test]
    async fn test_create_assigns_random_slug() {
        let repository = Arc::new(MockPositionRepository::new());
        let service = service(repository.clone());

        let created = service.create_position(new_position("Bitcoin")).await.unwrap();

        assert_eq!(created.slug.len(), SLUG_LENGTH);
        assert!(created.slug.chars().all(|c| c.is_ascii_lowercase()));
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test]
    async fn test_create_is_deterministic_with_seeded_generator() {
        let repo_a = Arc::new(MockPositionRepository::new());
        let repo_b = Arc::new(MockPositionRepository::new());

        let a = service(repo_a).create_position(new_position("Bitcoin")).await.unwrap();
        let b = service(repo_b).create_position(new_position("Bitcoin")).await.unwrap();

        assert_eq!(a.slug, b.slug);
    }

    #[tokio::test]
    async fn test_duplicate_triple_is_rejected_without_new_row() {
        let repository = Arc::new(MockPositionRepository::new());
        let service = service(repository.clone());

        service.create_position(new_position("Bitcoin")).await.unwrap();
        let err = service
            .create_position(new_position("Bitcoin"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test]
    async fn test_same_name_in_different_category_is_allowed() {
        let repository = Arc::new(MockPositionRepository::new());
        let service = service(repository.clone());

        service.create_position(new_position("Bitcoin")).await.unwrap();

        let mut other = new_position("Bitcoin");
        other.category_id = None;
        service.create_position(other).await.unwrap();

        assert_eq!(repository.count(), 2);
    }

    #[tokio::test]
    async fn test_slug_collision_is_retried() {
        let repository = Arc::new(MockPositionRepository::with_forced_slug_collisions(2));
        let service = service(repository.clone());

        let created = service.create_position(new_position("Bitcoin")).await.unwrap();

        assert_eq!(created.slug.len(), SLUG_LENGTH);
        assert_eq!(repository.create_calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_slug_retry_gives_up_at_cap() {
        let repository = Arc::new(MockPositionRepository::with_forced_slug_collisions(u32::MAX));
        let service = service(repository.clone());

        let err = service
            .create_position(new_position("Bitcoin"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert_eq!(
            repository.create_calls.load(std::sync::atomic::Ordering::SeqCst),
            SLUG_MAX_ATTEMPTS
        );
        assert_eq!(repository.count(), 0);
    }

    #[tokio::test]
    async fn test_create_persists_normalized_state() {
        let repository = Arc::new(MockPositionRepository::new());
        let service = service(repository.clone());

        let mut invalid = new_position("Bitcoin");
        invalid.quantity = Some(dec!(-5));

        let created = service.create_position(invalid).await.unwrap();

        assert_eq!(created.quantity, Decimal::ZERO);
        assert_eq!(created.cost_basis, Decimal::ZERO);
        assert_eq!(created.market_value, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_update_applies_normalization() {
        let repository = Arc::new(MockPositionRepository::new());
        let service = service(repository.clone());

        let created = service.create_position(new_position("Bitcoin")).await.unwrap();
        let updated = service
            .update_position(PositionUpdate {
                id: created.id,
                quantity: Some(dec!(1.5)),
                cost_basis: Some(dec!(-200)),
                market_value: Some(dec!(900)),
            })
            .await
            .unwrap();

        assert_eq!(updated.quantity, dec!(1.5));
        assert_eq!(updated.cost_basis, Decimal::ZERO);
        assert_eq!(updated.market_value, dec!(900));
    }

    #[tokio::test]
    async fn test_record_transaction_rejects_invalid_record() {
        let repository = Arc::new(MockPositionRepository::new());
        let service = service(repository.clone());

        let created = service.create_position(new_position("Bitcoin")).await.unwrap();
        let err = service
            .record_transaction(
                &created.id,
                TransactionRecord {
                    kind: TransactionKind::Sell,
                    quantity: dec!(0),
                    price: dec!(100),
                    date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        // The invalid record never reached the log.
        assert_eq!(service.get_position("pos-1").unwrap().transaction_log.len(), 1);
    }

    #[tokio::test]
    async fn test_record_transaction_sell_all_collapses_position() {
        let repository = Arc::new(MockPositionRepository::new());
        let service = service(repository.clone());

        let created = service.create_position(new_position("Bitcoin")).await.unwrap();
        let updated = service
            .record_transaction(
                &created.id,
                TransactionRecord {
                    kind: TransactionKind::Sell,
                    quantity: dec!(0.40),
                    price: dec!(45000),
                    date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.quantity, Decimal::ZERO);
        assert_eq!(updated.cost_basis, Decimal::ZERO);
        assert_eq!(updated.market_value, Decimal::ZERO);
        assert_eq!(updated.transaction_log.len(), 2);
    }
}
