use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random draws an analysis is built from.
pub trait RandomSource {
    /// Uniform float in the closed interval `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in the closed interval `[low, high]`.
    fn integer(&mut self, low: u64, high: u64) -> u64;
}

/// Adapts any `rand` generator to [`RandomSource`].
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..=high)
    }

    fn integer(&mut self, low: u64, high: u64) -> u64 {
        self.0.gen_range(low..=high)
    }
}

/// Hands out a fresh random source per analysis request.
pub trait EntropySource: Send + Sync {
    fn source(&self) -> Box<dyn RandomSource + Send>;
}

/// Production entropy: every source is seeded from the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn source(&self) -> Box<dyn RandomSource + Send> {
        Box::new(RngSource(StdRng::from_entropy()))
    }
}

/// Reproducible entropy: the n-th source is seeded with `base + n`.
#[derive(Debug)]
pub struct SeededEntropy {
    next_seed: AtomicU64,
}

impl SeededEntropy {
    pub fn new(base_seed: u64) -> Self {
        Self {
            next_seed: AtomicU64::new(base_seed),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn source(&self) -> Box<dyn RandomSource + Send> {
        let seed = self.next_seed.fetch_add(1, Ordering::Relaxed);
        Box::new(RngSource(StdRng::seed_from_u64(seed)))
    }
}
