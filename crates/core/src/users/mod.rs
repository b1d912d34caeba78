//! Users module - domain models and repository trait.

mod users_model;
mod users_traits;

// Re-export the public interface
pub use users_model::{NewUser, User};
pub use users_traits::UserRepositoryTrait;
