use log::debug;
use std::sync::Arc;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

/// Service for managing asset categories.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    /// Creates a new CategoryService instance.
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;

        let slug = new_category.resolved_slug();
        debug!("Creating category '{}' (slug: {})", new_category.name, slug);

        self.repository.create(new_category, slug).await
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        self.repository.delete(category_id).await?;
        Ok(())
    }

    fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository.get_by_id(category_id)
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.repository.find_by_slug(slug)
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        self.repository.list()
    }
}
