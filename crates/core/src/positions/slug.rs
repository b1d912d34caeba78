//! Random slug generation for positions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use super::positions_constants::SLUG_LENGTH;

/// Generates random position slugs: 15 independent uniform draws from the 26
/// lowercase letters.
///
/// The randomness source is explicit rather than ambient so tests can inject
/// a fixed seed and get deterministic slugs. Collisions are possible in
/// principle (26^15 space) and are handled by the service's retry loop
/// against the uniqueness constraint.
pub struct SlugGenerator {
    rng: Mutex<StdRng>,
}

impl SlugGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a generator with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draws the next slug candidate.
    pub fn next_slug(&self) -> String {
        let mut rng = self.rng.lock().unwrap();
        (0..SLUG_LENGTH)
            .map(|_| (b'a' + rng.gen_range(0..26u8)) as char)
            .collect()
    }
}

impl Default for SlugGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
