use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

use super::seed_model::{demo_categories, demo_positions, demo_user, SeedSummary, DEMO_USERNAME};
use super::seed_traits::SeedServiceTrait;
use crate::categories::{CategoryServiceTrait, NewCategory};
use crate::errors::Result;
use crate::positions::PositionServiceTrait;
use crate::users::{User, UserRepositoryTrait};
use crate::Error;

/// Service that loads and unloads the demo dataset.
pub struct SeedService {
    categories: Arc<dyn CategoryServiceTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    positions: Arc<dyn PositionServiceTrait>,
}

impl SeedService {
    /// Creates a new SeedService instance.
    pub fn new(
        categories: Arc<dyn CategoryServiceTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        positions: Arc<dyn PositionServiceTrait>,
    ) -> Self {
        Self {
            categories,
            users,
            positions,
        }
    }

    /// Get-or-create the demo identity.
    async fn ensure_demo_user(&self, summary: &mut SeedSummary) -> Result<User> {
        if let Some(user) = self.users.find_by_username(DEMO_USERNAME)? {
            debug!("Demo user already exists, skipping");
            return Ok(user);
        }

        match self.users.create(demo_user()).await {
            Ok(user) => {
                summary.users_created += 1;
                Ok(user)
            }
            // Lost a race against a concurrent seeding run.
            Err(err) if err.is_unique_violation() => self
                .users
                .find_by_username(DEMO_USERNAME)?
                .ok_or_else(|| Error::Unexpected("Demo user vanished after creation race".to_string())),
            Err(err) => Err(err),
        }
    }
}

#[async_trait::async_trait]
impl SeedServiceTrait for SeedService {
    async fn apply(&self) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();

        // Categories: get-or-create by slug.
        let mut category_ids: HashMap<&'static str, String> = HashMap::new();
        for definition in demo_categories() {
            let category = match self.categories.find_category_by_slug(definition.slug)? {
                Some(existing) => {
                    debug!("Category '{}' already exists, skipping", definition.slug);
                    existing
                }
                None => {
                    let input = NewCategory {
                        name: definition.name.to_string(),
                        slug: Some(definition.slug.to_string()),
                    };
                    match self.categories.create_category(input).await {
                        Ok(created) => {
                            summary.categories_created += 1;
                            created
                        }
                        Err(err) if err.is_unique_violation() => self
                            .categories
                            .find_category_by_slug(definition.slug)?
                            .ok_or_else(|| {
                                Error::Unexpected(format!(
                                    "Category '{}' vanished after creation race",
                                    definition.slug
                                ))
                            })?,
                        Err(err) => return Err(err),
                    }
                }
            };
            category_ids.insert(definition.slug, category.id);
        }

        let user = self.ensure_demo_user(&mut summary).await?;

        // Sample positions: skip any row whose (user, name, category) triple
        // already exists.
        for definition in demo_positions() {
            let category_id = category_ids.get(definition.category_slug).cloned();
            match self
                .positions
                .create_position(definition.to_new_position(&user.id, category_id))
                .await
            {
                Ok(_) => summary.positions_created += 1,
                Err(Error::ConstraintViolation(_)) => {
                    debug!("Position '{}' already exists, skipping", definition.name);
                }
                Err(err) if err.is_unique_violation() => {
                    debug!("Position '{}' already exists, skipping", definition.name);
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            "Seeding complete: {} categories, {} users, {} positions created",
            summary.categories_created, summary.users_created, summary.positions_created
        );
        Ok(summary)
    }

    async fn revert(&self) -> Result<()> {
        match self.users.find_by_username(DEMO_USERNAME)? {
            Some(user) => {
                let removed = self.positions.delete_positions_for_user(&user.id).await?;
                self.users.delete(&user.id).await?;
                info!(
                    "Removed demo user '{}' and {} seeded positions",
                    DEMO_USERNAME, removed
                );
            }
            None => {
                debug!("No demo user found, nothing to revert");
            }
        }

        for definition in demo_categories() {
            if let Some(category) = self.categories.find_category_by_slug(definition.slug)? {
                self.categories.delete_category(&category.id).await?;
                debug!("Removed seeded category '{}'", definition.slug);
            }
        }

        Ok(())
    }
}
