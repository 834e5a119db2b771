//! Random source used to pick a recipe among a day's candidates.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Picks one candidate out of `len`.
///
/// Implementations must return an index in `0..len`; `len` is never zero.
pub trait Chooser {
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Uniform draws from a [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngChooser<R> {
    rng: R,
}

impl<R: Rng> RngChooser<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngChooser<ThreadRng> {
    /// Draws from the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RngChooser<StdRng> {
    /// Reproducible draws for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Chooser for RngChooser<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
