//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines the interface for strategies responsible for breeding
//! the next generation from a set of selected parents.
pub mod ordered;

use std::fmt::Debug;

use crate::{
    error::Result,
    evolution::{options::EvolutionOptions, Challenge},
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
};

/// # BreedStrategy
///
/// The `BreedStrategy` trait defines the interface for strategies responsible for breeding
/// a new, fully evaluated population from selected parents.
pub trait BreedStrategy<Pheno: Phenotype>
where
    Self: Debug + Clone + Send + Sync,
{
    /// Breeds new individuals from `parents`.
    ///
    /// ## Parameters
    ///
    /// - `parents`: The selected parents, consumed by the breeding step.
    /// - `evol_options`: A reference to the evolution options specifying algorithm parameters.
    /// - `challenge`: Scores the offspring once they are final.
    /// - `rng`: A mutable reference to the random number generator used for generating
    ///   random values during breeding.
    ///
    /// ## Returns
    ///
    /// A Result containing the evaluated offspring, or a GeneticError if breeding fails.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - The parents vector is empty
    /// - Two parents cannot be recombined
    fn breed<C: Challenge + ?Sized>(
        &self,
        parents: Vec<Pheno>,
        evol_options: &EvolutionOptions,
        challenge: &C,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Pheno>>;
}

pub use ordered::OrderedBreedStrategy;
