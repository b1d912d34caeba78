//! Seed module - demo dataset and the idempotent load/teardown service.

mod seed_model;
mod seed_service;
mod seed_traits;

#[cfg(test)]
mod seed_service_tests;

// Re-export the public interface
pub use seed_model::{
    demo_categories, demo_positions, demo_user, SeedCategory, SeedPosition, SeedSummary,
    DEMO_USERNAME,
};
pub use seed_service::SeedService;
pub use seed_traits::SeedServiceTrait;
