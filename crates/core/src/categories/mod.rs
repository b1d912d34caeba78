//! Categories module - domain models, services, and traits.

mod categories_model;
mod categories_service;
mod categories_traits;


// Re-export the public interface
pub use categories_model::{slugify, Category, NewCategory};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
