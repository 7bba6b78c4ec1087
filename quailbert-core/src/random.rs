//! Shared random source.
//!
//! Every random decision (question choice, reward amount, greeting choice,
//! sweep recipient) goes through one [`Dice`], so a seeded instance makes a
//! whole bot deterministic.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

/// A clonable handle to a single seedable RNG.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: Arc<Mutex<StdRng>>,
}

impl Dice {
    /// Create dice seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create deterministic dice.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *rng)
    }

    /// Pick one element uniformly at random. `None` for an empty slice.
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.with_rng(|rng| items.choose(rng))
    }

    /// Roll an integer in the inclusive range.
    pub fn roll(&self, range: RangeInclusive<u64>) -> u64 {
        self.with_rng(|rng| rng.gen_range(range))
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::from_entropy()
    }
}
