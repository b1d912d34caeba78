use log::{debug, warn};
use std::sync::Arc;

use super::positions_constants::SLUG_MAX_ATTEMPTS;
use super::positions_model::{NewPosition, Position, PositionUpdate, TransactionRecord};
use super::positions_traits::{PositionRepositoryTrait, PositionServiceTrait};
use super::slug::SlugGenerator;
use crate::errors::{DatabaseError, Result};
use crate::Error;

/// Service for managing positions.
///
/// Owns the slug generator so the randomness source is injected explicitly;
/// tests construct the service with a seeded generator.
pub struct PositionService {
    repository: Arc<dyn PositionRepositoryTrait>,
    slugs: Arc<SlugGenerator>,
}

impl PositionService {
    /// Creates a new PositionService instance.
    pub fn new(repository: Arc<dyn PositionRepositoryTrait>, slugs: Arc<SlugGenerator>) -> Self {
        Self { repository, slugs }
    }
}

#[async_trait::async_trait]
impl PositionServiceTrait for PositionService {
    async fn create_position(&self, new_position: NewPosition) -> Result<Position> {
        new_position.validate()?;

        // Duplicate (user, name, category) rows are rejected up front; the
        // unique index cannot cover the NULL-category case on SQLite.
        if let Some(existing) = self.repository.find_by_owner_name_category(
            &new_position.user_id,
            &new_position.name,
            new_position.category_id.as_deref(),
        )? {
            return Err(Error::ConstraintViolation(format!(
                "Position '{}' already exists for this user and category (id: {})",
                new_position.name, existing.id
            )));
        }

        let (_, _, _, warnings) = new_position.normalized_valuation();
        for warning in &warnings {
            warn!("Normalizing position '{}': {}", new_position.name, warning);
        }

        let mut attempts: u32 = 0;
        loop {
            let slug = self.slugs.next_slug();
            debug!(
                "Creating position '{}' with slug candidate {}",
                new_position.name, slug
            );

            match self.repository.create(new_position.clone(), slug).await {
                Err(Error::Database(DatabaseError::UniqueViolation(message))) => {
                    if message.contains("slug") {
                        attempts += 1;
                        if attempts >= SLUG_MAX_ATTEMPTS {
                            return Err(Error::ConstraintViolation(format!(
                                "Could not allocate a unique slug after {} attempts",
                                SLUG_MAX_ATTEMPTS
                            )));
                        }
                        warn!(
                            "Slug collision while creating position '{}', retrying ({}/{})",
                            new_position.name, attempts, SLUG_MAX_ATTEMPTS
                        );
                        continue;
                    }
                    // Lost a race on the (user, name, category) constraint.
                    return Err(Error::ConstraintViolation(message));
                }
                other => return other,
            }
        }
    }

    async fn update_position(&self, update: PositionUpdate) -> Result<Position> {
        update.validate()?;

        let (_, _, _, warnings) = update.normalized_valuation();
        for warning in &warnings {
            warn!("Normalizing position {}: {}", update.id, warning);
        }

        self.repository.update(update).await
    }

    async fn record_transaction(
        &self,
        position_id: &str,
        record: TransactionRecord,
    ) -> Result<Position> {
        record.validate()?;
        self.repository.record_transaction(position_id, record).await
    }

    async fn delete_position(&self, position_id: &str) -> Result<()> {
        self.repository.delete(position_id).await?;
        Ok(())
    }

    async fn delete_positions_for_user(&self, user_id: &str) -> Result<usize> {
        self.repository.delete_by_user(user_id).await
    }

    fn get_position(&self, position_id: &str) -> Result<Position> {
        self.repository.get_by_id(position_id)
    }

    fn find_position_by_slug(&self, slug: &str) -> Result<Option<Position>> {
        self.repository.find_by_slug(slug)
    }

    fn list_positions_for_user(&self, user_id: &str) -> Result<Vec<Position>> {
        self.repository.list_by_user(user_id)
    }

    fn list_positions_in_category(&self, category_id: &str) -> Result<Vec<Position>> {
        self.repository.list_by_category(category_id)
    }
}
