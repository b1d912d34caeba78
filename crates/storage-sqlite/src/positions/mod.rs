//! Position storage: database model and repository.

pub mod model;
pub mod repository;

pub use model::PositionDB;
pub use repository::PositionRepository;
