//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through the single seeded stream owned by the
//! runner. Entities draw from it in a fixed order (registration order,
//! once per slice), so a given seed fully determines every run.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Seed applied when the caller never calls `Runner::seed`.
pub const DEFAULT_SEED: u64 = 0;

/// The simulation's single deterministic RNG stream.
pub struct SimRng {
    inner: Pcg64Mcg,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Restart the stream from `seed`. Reseeding after stepping has begun
    /// is undefined with respect to reproducibility.
    pub fn reseed(&mut self, seed: u64) {
        self.inner = Pcg64Mcg::seed_from_u64(seed);
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Bernoulli trial: returns true with probability p.
    /// Always consumes exactly one value from the stream.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
