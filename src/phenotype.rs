//! # Phenotype Trait
//!
//! The `Phenotype` trait defines the interface for individuals in the search:
//! recombination, mutation, evaluation against a [`Challenge`] and access to
//! the resulting fitness.
//!
//! Fitness is optional. Freshly recombined or mutated individuals carry no
//! fitness until [`Phenotype::evaluate`] is called, which keeps evaluation out
//! of the crossover step.

use std::fmt::Debug;

use crate::error::Result;
use crate::evolution::Challenge;
use crate::rng::RandomNumberGenerator;

/// Trait for types that represent individuals in the evolutionary search.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`
/// and `Sync` so that populations can be evaluated in parallel.
pub trait Phenotype: Clone + Debug + Send + Sync {
    /// Recombines `self` with `other` into two children whose fitness is not
    /// yet computed.
    ///
    /// ## Errors
    ///
    /// Fails if the two individuals cannot be recombined, for example because
    /// their encodings differ in shape.
    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)>;

    /// Mutates every gene with independent `probability` and discards the
    /// current fitness.
    fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator);

    /// Computes and stores the fitness under `challenge`.
    fn evaluate<C: Challenge + ?Sized>(&mut self, challenge: &C);

    /// The stored fitness, or `None` if the individual has not been evaluated
    /// since it was last changed.
    fn fitness(&self) -> Option<f64>;

    /// Reorders internal alternatives before recombination. Does nothing by
    /// default.
    fn resolve_dominance(&mut self) {}
}
