//! Positions module - domain models, services, and traits.

mod positions_constants;
mod positions_model;
mod positions_service;
mod positions_traits;
mod slug;


#[cfg(test)]
mod positions_service_tests;

// Re-export the public interface
pub use positions_constants::*;
pub use positions_model::{
    normalize_valuation, NewPosition, NormalizationWarning, Position, PositionUpdate,
    TransactionKind, TransactionRecord,
};
pub use positions_service::PositionService;
pub use positions_traits::{PositionRepositoryTrait, PositionServiceTrait};
pub use slug::SlugGenerator;
