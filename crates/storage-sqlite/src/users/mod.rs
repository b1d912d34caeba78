//! User storage: database model and repository.

pub mod model;
pub mod repository;

pub use model::UserDB;
pub use repository::UserRepository;
