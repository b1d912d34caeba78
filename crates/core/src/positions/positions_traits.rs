//! Position repository and service traits.
//!
//! These traits define the contract for position operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::positions_model::{NewPosition, Position, PositionUpdate, TransactionRecord};
use crate::errors::Result;

/// Trait defining the contract for Position repository operations.
///
/// Every write re-applies the normalization contract before persisting, so
/// the stored state never represents an impossible economic condition.
#[async_trait]
pub trait PositionRepositoryTrait: Send + Sync {
    /// Creates a new position with the given slug.
    ///
    /// Returns `DatabaseError::UniqueViolation` on a slug collision or a
    /// duplicate (user, name, category) triple.
    async fn create(&self, new_position: NewPosition, slug: String) -> Result<Position>;

    /// Overwrites the position's valuation state (normalized on write).
    async fn update(&self, update: PositionUpdate) -> Result<Position>;

    /// Appends a transaction to the log and persists the adjusted state,
    /// as one atomic read-modify-write.
    async fn record_transaction(
        &self,
        position_id: &str,
        record: TransactionRecord,
    ) -> Result<Position>;

    /// Deletes a position by ID. Returns the number of deleted records.
    async fn delete(&self, position_id: &str) -> Result<usize>;

    /// Deletes every position owned by a user. Returns the number of deleted
    /// records.
    async fn delete_by_user(&self, user_id: &str) -> Result<usize>;

    /// Retrieves a position by its ID.
    fn get_by_id(&self, position_id: &str) -> Result<Position>;

    /// Looks up a position by its slug.
    fn find_by_slug(&self, slug: &str) -> Result<Option<Position>>;

    /// Looks up a position by its identifying (user, name, category) triple.
    fn find_by_owner_name_category(
        &self,
        user_id: &str,
        name: &str,
        category_id: Option<&str>,
    ) -> Result<Option<Position>>;

    /// Lists a user's positions, newest first.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Position>>;

    /// Lists the positions filed under a category, newest first.
    fn list_by_category(&self, category_id: &str) -> Result<Vec<Position>>;
}

/// Trait defining the contract for Position service operations.
#[async_trait]
pub trait PositionServiceTrait: Send + Sync {
    /// Creates a new position, assigning a fresh random slug and retrying on
    /// slug collisions up to a fixed cap.
    async fn create_position(&self, new_position: NewPosition) -> Result<Position>;

    /// Updates a position's valuation state with normalization.
    async fn update_position(&self, update: PositionUpdate) -> Result<Position>;

    /// Appends a buy/sell event to a position's log and adjusts its state.
    async fn record_transaction(
        &self,
        position_id: &str,
        record: TransactionRecord,
    ) -> Result<Position>;

    /// Deletes a position.
    async fn delete_position(&self, position_id: &str) -> Result<()>;

    /// Deletes every position owned by a user; returns how many were removed.
    async fn delete_positions_for_user(&self, user_id: &str) -> Result<usize>;

    /// Retrieves a position by ID.
    fn get_position(&self, position_id: &str) -> Result<Position>;

    /// Looks up a position by slug.
    fn find_position_by_slug(&self, slug: &str) -> Result<Option<Position>>;

    /// Lists a user's positions.
    fn list_positions_for_user(&self, user_id: &str) -> Result<Vec<Position>>;

    /// Lists the positions filed under a category.
    fn list_positions_in_category(&self, category_id: &str) -> Result<Vec<Position>>;
}
