//! Position module constants.

/// Length of the random slug assigned to every position.
pub const SLUG_LENGTH: usize = 15;

/// Maximum number of slug candidates tried before the create fails loudly.
pub const SLUG_MAX_ATTEMPTS: u32 = 5;
