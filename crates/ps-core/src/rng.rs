//! Seeded RNG for scenario generation.
//!
//! The per-agent tick update is a pure function of agent state and the tick's
//! environment snapshot; it never draws random numbers.  Randomness belongs
//! to drivers that *build* scenarios (spawn positions, desired speeds), and
//! those draw from a `SimRng` seeded by `SimConfig::seed` so runs are
//! reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Vec2;

/// Deterministic generator for spawn positions and per-agent speeds.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample from `range` (half-open or inclusive).
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform point in the axis-aligned box `[min, max]`.  A degenerate
    /// axis (`min == max`) yields that coordinate exactly.
    pub fn point_in(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(self.0.gen_range(min.x..=max.x), self.0.gen_range(min.y..=max.y))
    }
}
