//! A genetic algorithm for the travelling salesman problem where travel
//! inside a circular region runs at a velocity that changes during the run.
//!
//! Tours are permutations of a [`cities::CityMap`]. Each generation is scored
//! by a [`travel::TravelModel`] snapshot, bred with tournament selection,
//! ordered crossover and swap mutation, and individuals may carry one or two
//! strands ([`salesman::Ploidy`]).
pub mod cities;
pub mod error;
pub mod evolution;
pub mod geometry;
pub mod operators;
pub mod phenotype;
pub mod rng;
pub mod salesman;
pub mod selection;
pub mod strategy;
pub mod travel;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use phenotype::Phenotype;
pub use selection::SelectionStrategy;
pub use strategy::BreedStrategy;
