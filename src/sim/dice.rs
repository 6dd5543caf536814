//! Randomness seam for the simulation
//!
//! Power-up spawn rolls and particle jitter are the only non-deterministic
//! inputs. Everything goes through [`Dice`] so tests can script outcomes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of random decisions used by the simulation
pub trait Dice {
    /// Returns true with probability `1 / chance`. Never true for `chance == 0`.
    fn one_in(&mut self, chance: u32) -> bool;

    /// Uniform sample in `[low, high)`
    fn uniform(&mut self, low: f32, high: f32) -> f32;
}

/// Seeded PCG generator, seeded once at startup
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for SimRng {
    fn one_in(&mut self, chance: u32) -> bool {
        match chance {
            0 => false,
            1 => true,
            n => self.rng.random_range(0..n) == 0,
        }
    }

    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }
}
