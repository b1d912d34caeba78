//! Tests for the seeding service: idempotent apply and full reversal.

#[cfg(test)]
mod tests {
    use crate::categories::{Category, CategoryServiceTrait, NewCategory};
    use crate::errors::{DatabaseError, Result};
    use crate::positions::{
        NewPosition, Position, PositionServiceTrait, PositionUpdate, TransactionRecord,
    };
    use crate::seed::{SeedService, SeedServiceTrait, SeedSummary};
    use crate::users::{NewUser, User, UserRepositoryTrait};
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // --- Mock CategoryService ---
    #[derive(Default)]
    struct MockCategoryService {
        categories: Arc<Mutex<Vec<Category>>>,
    }

    impl MockCategoryService {
        fn count(&self) -> usize {
            self.categories.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CategoryServiceTrait for MockCategoryService {
        async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
            new_category.validate()?;
            let slug = new_category.resolved_slug();
            let mut categories = self.categories.lock().unwrap();
            if categories.iter().any(|c| c.slug == slug) {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: categories.slug".to_string(),
                )));
            }
            let category = Category {
                id: format!("cat-{}", slug),
                name: new_category.name,
                slug,
                ..Default::default()
            };
            categories.push(category.clone());
            Ok(category)
        }

        async fn delete_category(&self, category_id: &str) -> Result<()> {
            self.categories
                .lock()
                .unwrap()
                .retain(|c| c.id != category_id);
            Ok(())
        }

        fn get_category(&self, category_id: &str) -> Result<Category> {
            self.categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == category_id)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(category_id.to_string())))
        }

        fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.slug == slug)
                .cloned())
        }

        fn list_categories(&self) -> Result<Vec<Category>> {
            Ok(self.categories.lock().unwrap().clone())
        }
    }

    // --- Mock UserRepository ---
    #[derive(Default)]
    struct MockUserRepository {
        users: Arc<Mutex<Vec<User>>>,
    }

    impl MockUserRepository {
        fn count(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        async fn create(&self, new_user: NewUser) -> Result<User> {
            new_user.validate()?;
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == new_user.username) {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: users.username".to_string(),
                )));
            }
            let user = User {
                id: format!("user-{}", new_user.username),
                username: new_user.username,
                email: new_user.email,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                ..Default::default()
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn delete(&self, user_id: &str) -> Result<usize> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != user_id);
            Ok(before - users.len())
        }

        fn get_by_id(&self, user_id: &str) -> Result<User> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(user_id.to_string())))
        }

        fn find_by_username(&self, username: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }
    }

    // --- Mock PositionService ---
    #[derive(Default)]
    struct MockPositionService {
        positions: Arc<Mutex<Vec<Position>>>,
    }

    impl MockPositionService {
        fn count(&self) -> usize {
            self.positions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PositionServiceTrait for MockPositionService {
        async fn create_position(&self, new_position: NewPosition) -> Result<Position> {
            new_position.validate()?;
            let mut positions = self.positions.lock().unwrap();
            if positions.iter().any(|p| {
                p.user_id == new_position.user_id
                    && p.name == new_position.name
                    && p.category_id == new_position.category_id
            }) {
                return Err(Error::ConstraintViolation(format!(
                    "Position '{}' already exists for this user and category",
                    new_position.name
                )));
            }
            let (quantity, cost_basis, market_value, _) = new_position.normalized_valuation();
            let position = Position {
                id: format!("pos-{}", positions.len() + 1),
                user_id: new_position.user_id,
                category_id: new_position.category_id,
                name: new_position.name,
                slug: format!("slug{:06}xyzab", positions.len() + 1),
                quantity,
                cost_basis,
                market_value,
                transaction_log: new_position.transaction_log,
                ..Default::default()
            };
            positions.push(position.clone());
            Ok(position)
        }

        async fn update_position(&self, _update: PositionUpdate) -> Result<Position> {
            unimplemented!()
        }

        async fn record_transaction(
            &self,
            _position_id: &str,
            _record: TransactionRecord,
        ) -> Result<Position> {
            unimplemented!()
        }

        async fn delete_position(&self, position_id: &str) -> Result<()> {
            self.positions
                .lock()
                .unwrap()
                .retain(|p| p.id != position_id);
            Ok(())
        }

        async fn delete_positions_for_user(&self, user_id: &str) -> Result<usize> {
            let mut positions = self.positions.lock().unwrap();
            let before = positions.len();
            positions.retain(|p| p.user_id != user_id);
            Ok(before - positions.len())
        }

        fn get_position(&self, position_id: &str) -> Result<Position> {
            self.positions
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == position_id)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(position_id.to_string())))
        }

        fn find_position_by_slug(&self, slug: &str) -> Result<Option<Position>> {
            Ok(self
                .positions
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.slug == slug)
                .cloned())
        }

        fn list_positions_for_user(&self, user_id: &str) -> Result<Vec<Position>> {
            Ok(self
                .positions
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.user_id == user_id)
                .cloned()
                .collect())
        }

        fn list_positions_in_category(&self, category_id: &str) -> Result<Vec<Position>> {
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

    struct Harness {
        categories: Arc<MockCategoryService>,
        users: Arc<MockUserRepository>,
        positions: Arc<MockPositionService>,
        seeder: SeedService,
    }

    fn harness() -> Harness {
        let categories = Arc::new(MockCategoryService::default());
        let users = Arc::new(MockUserRepository::default());
        let positions = Arc::new(MockPositionService::default());
        let seeder = SeedService::new(categories.clone(), users.clone(), positions.clone());
        Harness {
            categories,
            users,
            positions,
            seeder,
        }
    }

    #[tokio::test]
    async fn test_apply_creates_full_dataset() {
        let h = harness();
        let summary = h.seeder.apply().await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                categories_created: 4,
                users_created: 1,
                positions_created: 10,
            }
        );
        assert_eq!(h.categories.count(), 4);
        assert_eq!(h.users.count(), 1);
        assert_eq!(h.positions.count(), 10);
    }

    #[tokio::test]
    async fn test_apply_twice_is_idempotent() {
        let h = harness();
        h.seeder.apply().await.unwrap();
        let second = h.seeder.apply().await.unwrap();

        assert_eq!(second, SeedSummary::default());
        assert_eq!(h.categories.count(), 4);
        assert_eq!(h.users.count(), 1);
        assert_eq!(h.positions.count(), 10);
    }

    #[tokio::test]
    async fn test_apply_fills_only_missing_rows() {
        let h = harness();
        h.categories
            .create_category(NewCategory {
                name: "Cryptocurrency".to_string(),
                slug: Some("crypto".to_string()),
            })
            .await
            .unwrap();
        h.categories
            .create_category(NewCategory {
                name: "Stocks".to_string(),
                slug: Some("stocks".to_string()),
            })
            .await
            .unwrap();

        let summary = h.seeder.apply().await.unwrap();

        assert_eq!(summary.categories_created, 2);
        assert_eq!(summary.users_created, 1);
        assert_eq!(summary.positions_created, 10);
        assert_eq!(h.categories.count(), 4);
    }

    #[tokio::test]
    async fn test_revert_removes_everything_apply_created() {
        let h = harness();
        h.seeder.apply().await.unwrap();
        h.seeder.revert().await.unwrap();

        assert_eq!(h.positions.count(), 0);
        assert_eq!(h.users.count(), 0);
        assert_eq!(h.categories.count(), 0);
    }

    #[tokio::test]
    async fn test_revert_on_empty_database_is_noop() {
        let h = harness();
        h.seeder.revert().await.unwrap();

        assert_eq!(h.positions.count(), 0);
        assert_eq!(h.users.count(), 0);
        assert_eq!(h.categories.count(), 0);
    }

    #[tokio::test]
    async fn test_apply_after_revert_recreates_dataset() {
        let h = harness();
        h.seeder.apply().await.unwrap();
        h.seeder.revert().await.unwrap();
        let summary = h.seeder.apply().await.unwrap();

        assert_eq!(summary.positions_created, 10);
        assert_eq!(h.positions.count(), 10);
    }
}
