//! Seeding service trait.

use async_trait::async_trait;

use super::seed_model::SeedSummary;
use crate::errors::Result;

/// Idempotent bulk-load of the demo dataset, with full reversal.
#[async_trait]
pub trait SeedServiceTrait: Send + Sync {
    /// Creates any missing demo categories, the demo identity, and any
    /// missing sample positions. Never duplicates existing rows; rows that
    /// already exist are skipped. Returns the counts actually created.
    async fn apply(&self) -> Result<SeedSummary>;

    /// Deletes everything `apply` created: the demo user's positions, the
    /// demo user, and the seeded categories (dependents removed by cascade).
    /// A missing demo identity is a no-op, not a failure.
    async fn revert(&self) -> Result<()>;
}
