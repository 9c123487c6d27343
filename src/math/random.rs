//! Seeded pseudo-random numbers.

use super::consts::TWO_PI;
use super::Vector3;

const MULTIPLIER: u32 = 214013;
const INCREMENT: u32 = 2531011;
const MAX_INT: u32 = 0x7FFF;

/// Linear congruential generator with 15-bit output.
///
/// Deterministic for a given seed, so procedural content can be
/// regenerated exactly. Not suitable for anything security related.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Random {
    state: u32,
}

impl Default for Random {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Random {
    /// Create a generator with the given seed.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Restart the sequence.
    pub fn set_seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Next integer in `[0, 0x7FFF]`.
    pub fn get_int(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.state >> 16) & MAX_INT
    }

    /// Next value in `[0, 1]`.
    pub fn get_double(&mut self) -> f64 {
        self.get_int() as f64 / MAX_INT as f64
    }

    /// Next value in `[lo, hi]`.
    pub fn get_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.get_double()
    }

    /// Uniformly distributed unit vector.
    pub fn get_direction(&mut self) -> Vector3 {
        let theta = TWO_PI * self.get_double();
        let phi = (2.0 * self.get_double() - 1.0).clamp(-1.0, 1.0).acos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Vector3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
    }
}
