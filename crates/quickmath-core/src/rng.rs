//! Bounded random draws for equation generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seedable random source shared by the equation factory and round builder.
pub struct QuizRng {
    inner: StdRng,
}

impl QuizRng {
    /// Seeded generators replay the same rounds; `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { inner }
    }

    /// Uniform draw in `[0, max)`. A zero bound yields 0.
    pub fn below(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.inner.gen_range(0..max)
    }

    /// Unbiased in-place shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}
