//! SQLite storage implementation for TradeHub.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `tradehub-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - Repository implementations for users, categories and positions
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist; `core` is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod categories;
pub mod positions;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from tradehub-core for convenience
pub use tradehub_core::errors::{DatabaseError, Error, Result};
