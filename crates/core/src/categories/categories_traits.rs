//! Category repository and service traits.
//!
//! These traits define the contract for category operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::categories_model::{Category, NewCategory};
use crate::errors::Result;

/// Trait defining the contract for Category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Creates a new category with the given slug.
    ///
    /// Returns `DatabaseError::UniqueViolation` when the slug is taken.
    async fn create(&self, new_category: NewCategory, slug: String) -> Result<Category>;

    /// Deletes a category by its ID.
    ///
    /// Positions filed under the category are removed by cascade.
    /// Returns the number of deleted records.
    async fn delete(&self, category_id: &str) -> Result<usize>;

    /// Retrieves a category by its ID.
    fn get_by_id(&self, category_id: &str) -> Result<Category>;

    /// Looks up a category by its slug.
    fn find_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    /// Lists all categories ordered by name.
    fn list(&self) -> Result<Vec<Category>>;
}

/// Trait defining the contract for Category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Creates a new category, deriving the slug from the name when no
    /// explicit slug is given.
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Deletes a category and, by cascade, the positions filed under it.
    async fn delete_category(&self, category_id: &str) -> Result<()>;

    /// Retrieves a category by ID.
    fn get_category(&self, category_id: &str) -> Result<Category>;

    /// Looks up a category by slug.
    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    /// Lists all categories.
    fn list_categories(&self) -> Result<Vec<Category>>;
}
