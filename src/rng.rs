//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single random source threaded through
//! every operator. Selection, pairing, crossover cut points and mutation all draw
//! from it in population order, so a seeded generator reproduces a whole run.
//!
//! ## Example
//!
//! ```rust
//! use slowzone::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let tour = rng.permutation(5);
//!
//! assert_eq!(tour.len(), 5);
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` exposing the draws the
/// genetic operators need.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniform sample from `[0, 1)`.
    pub fn probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a uniform index from `0..=upper`.
    pub fn index_inclusive(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..=upper)
    }

    /// Returns a uniform index from `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Shuffles `values` in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }

    /// Returns a uniformly random permutation of `0..len`.
    pub fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut values: Vec<usize> = (0..len).collect();
        self.shuffle(&mut values);
        values
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_range() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            let p = rng.probability();
            assert!((0.0..1.0).contains(&p));
        }
    }

    #[test]
    fn test_index_inclusive_reaches_bounds() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let draws: Vec<usize> = (0..500).map(|_| rng.index_inclusive(2)).collect();
        assert!(draws.iter().all(|&d| d <= 2));
        assert!(draws.contains(&0));
        assert!(draws.contains(&2));
    }

    #[test]
    fn test_permutation_is_complete() {
        let mut rng = RandomNumberGenerator::new();
        let mut tour = rng.permutation(20);
        tour.sort_unstable();
        assert_eq!(tour, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_permutation_empty() {
        let mut rng = RandomNumberGenerator::new();
        assert!(rng.permutation(0).is_empty());
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        // Both RNGs should generate the same sequence after cloning
        assert_eq!(rng1.permutation(10), rng2.permutation(10));
        assert_eq!(rng1.probability(), rng2.probability());
    }
}
