//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration options for a run:
//! generation count, population size, operator probabilities, tournament size,
//! ploidy, the parallel evaluation threshold and the logging level.
//!
//! ## Example
//!
//! ```rust
//! use slowzone::evolution::options::{EvolutionOptions, LogLevel};
//! use slowzone::salesman::Ploidy;
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(300)
//!     .population_size(200)
//!     .mutation_probability(0.02)
//!     .crossover_probability(0.9)
//!     .tournament_size(4)
//!     .ploidy(Ploidy::Diploid)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! ```
//!
//! ## `LogLevel`
//!
//! - `Verbose`: Per-generation `info` events plus `debug` events for regime
//!   switches and population statistics.
//! - `Minimal`: One `info` event per generation.
//! - `None`: Disables logging.

use crate::error::{GeneticError, Result};
use crate::salesman::Ploidy;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    mutation_probability: f64,
    crossover_probability: f64,
    tournament_size: usize,
    ploidy: Ploidy,
    /// Minimum number of individuals to evaluate in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// The requested population size. Populations are built with this size
    /// rounded up to the next even number.
    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    /// Per-gene swap probability.
    pub fn get_mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    /// Probability that a parent pair is recombined.
    pub fn get_crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_ploidy(&self) -> Ploidy {
        self.ploidy
    }

    /// Returns the minimum number of individuals to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_mutation_probability(&mut self, probability: f64) {
        self.mutation_probability = probability;
    }

    pub fn set_crossover_probability(&mut self, probability: f64) {
        self.crossover_probability = probability;
    }

    pub fn set_tournament_size(&mut self, tournament_size: usize) {
        self.tournament_size = tournament_size;
    }

    pub fn set_ploidy(&mut self, ploidy: Ploidy) {
        self.ploidy = ploidy;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Checks that the options describe a runnable search.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the population size or tournament
    /// size is zero, or a probability is outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.tournament_size == 0 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("Mutation", self.mutation_probability),
            ("Crossover", self.crossover_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GeneticError::Configuration(format!(
                    "{} probability must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 300,
            log_level: LogLevel::None,
            population_size: 200,
            mutation_probability: 0.02,
            crossover_probability: 0.9,
            tournament_size: 4,
            ploidy: Ploidy::Haploid,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset values fall back to `EvolutionOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    mutation_probability: Option<f64>,
    crossover_probability: Option<f64>,
    tournament_size: Option<usize>,
    ploidy: Option<Ploidy>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn ploidy(mut self, value: Ploidy) -> Self {
        self.ploidy = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let default = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(default.num_generations),
            log_level: self.log_level.unwrap_or(default.log_level),
            population_size: self.population_size.unwrap_or(default.population_size),
            mutation_probability: self
                .mutation_probability
                .unwrap_or(default.mutation_probability),
            crossover_probability: self
                .crossover_probability
                .unwrap_or(default.crossover_probability),
            tournament_size: self.tournament_size.unwrap_or(default.tournament_size),
            ploidy: self.ploidy.unwrap_or(default.ploidy),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(default.parallel_threshold),
        }
    }
}
