//! User repository trait.
//!
//! There is deliberately no user service: credential handling and sessions
//! are an external collaborator's concern. This trait covers only what the
//! position layer and the seeder need from the identity store.

use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Creates a new user.
    ///
    /// Returns `DatabaseError::UniqueViolation` when the username is taken.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Deletes a user by ID. Owned positions are removed by cascade.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, user_id: &str) -> Result<usize>;

    /// Retrieves a user by ID.
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Looks up a user by username.
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}
