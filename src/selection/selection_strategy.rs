use std::fmt::Debug;

use crate::error::Result;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies.
///
/// Selection strategies choose individuals from an evaluated population based
/// on the fitness each individual carries.
///
/// # Examples
///
/// ```
/// use slowzone::evolution::Challenge;
/// use slowzone::rng::RandomNumberGenerator;
/// use slowzone::salesman::Salesman;
/// use slowzone::selection::{SelectionStrategy, TournamentSelection};
///
/// struct FirstCity;
///
/// impl Challenge for FirstCity {
///     fn score(&self, tour: &[usize]) -> f64 {
///         1.0 / (tour[0] as f64 + 1.0)
///     }
/// }
///
/// let population = vec![
///     Salesman::haploid(vec![0, 1, 2]).evaluated(&FirstCity),
///     Salesman::haploid(vec![1, 2, 0]).evaluated(&FirstCity),
///     Salesman::haploid(vec![2, 0, 1]).evaluated(&FirstCity),
/// ];
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let selection = TournamentSelection::new(2).unwrap();
/// let selected = selection.select(&population, 3, &mut rng).unwrap();
///
/// assert_eq!(selected.len(), 3);
/// ```
pub trait SelectionStrategy<P>: Debug + Send + Sync
where
    P: Phenotype,
{
    /// Selects `num_to_select` individuals from the population.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - An individual has no fitness yet
    fn select(
        &self,
        population: &[P],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<P>>;
}
