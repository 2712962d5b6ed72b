//! # Population
//!
//! Building the initial population, evaluating populations (in parallel above
//! a size threshold) and querying the fittest individuals.

use std::cmp::Ordering;

use rayon::prelude::*;

use super::{challenge::TourChallenge, options::EvolutionOptions, Challenge};
use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::salesman::Salesman;

/// `requested` rounded up to the next even number.
pub fn even_population_size(requested: usize) -> usize {
    requested + requested % 2
}

/// Builds generation 0: independent random tours over every city, each
/// evaluated under `challenge`.
///
/// The population size is `options.get_population_size()` rounded up to an
/// even number and every individual has `options.get_ploidy()`.
///
/// # Errors
///
/// Returns a configuration error if the population size is zero or there are
/// no cities.
pub fn build_initial_population(
    options: &EvolutionOptions,
    challenge: &TourChallenge<'_>,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<Salesman>> {
    if options.get_population_size() == 0 {
        return Err(GeneticError::Configuration(
            "Population size cannot be zero".to_string(),
        ));
    }

    let num_cities = challenge.cities().len();
    if num_cities == 0 {
        return Err(GeneticError::Configuration(
            "Cannot build tours without cities".to_string(),
        ));
    }

    let size = even_population_size(options.get_population_size());
    let mut population: Vec<Salesman> = (0..size)
        .map(|_| Salesman::random(options.get_ploidy(), num_cities, rng))
        .collect();
    evaluate_population(&mut population, challenge, options.get_parallel_threshold());

    Ok(population)
}

/// Evaluates every individual under `challenge`.
///
/// Runs on the rayon thread pool once the population reaches
/// `parallel_threshold` individuals. The challenge is pure, so both paths
/// produce the same fitness values.
pub fn evaluate_population<P, C>(population: &mut [P], challenge: &C, parallel_threshold: usize)
where
    P: Phenotype,
    C: Challenge + ?Sized,
{
    if population.len() >= parallel_threshold {
        population
            .par_iter_mut()
            .for_each(|individual| individual.evaluate(challenge));
    } else {
        for individual in population.iter_mut() {
            individual.evaluate(challenge);
        }
    }
}

/// The fittest evaluated individual. On equal fitness the earliest one wins.
pub fn best<P: Phenotype>(population: &[P]) -> Option<&P> {
    let mut best: Option<(&P, f64)> = None;
    for individual in population {
        if let Some(fitness) = individual.fitness() {
            match best {
                Some((_, best_fitness)) if fitness <= best_fitness => {}
                _ => best = Some((individual, fitness)),
            }
        }
    }
    best.map(|(individual, _)| individual)
}

/// The `k` fittest individuals, fittest first. Equal fitness keeps population
/// order and unevaluated individuals sort last.
///
/// Returns `None` when `k` is zero.
pub fn best_k<P: Phenotype>(population: &[P], k: usize) -> Option<Vec<&P>> {
    if k < 1 {
        return None;
    }

    let mut ranked: Vec<&P> = population.iter().collect();
    ranked.sort_by(|a, b| compare_descending(a.fitness(), b.fitness()));
    ranked.truncate(k);
    Some(ranked)
}

fn compare_descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Fitness summary of one population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
}

/// Summarises the evaluated individuals, or `None` if there are none.
pub fn fitness_stats<P: Phenotype>(population: &[P]) -> Option<FitnessStats> {
    let values: Vec<f64> = population.iter().filter_map(|p| p.fitness()).collect();
    if values.is_empty() {
        return None;
    }

    let best = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let worst = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(FitnessStats { best, mean, worst })
}
