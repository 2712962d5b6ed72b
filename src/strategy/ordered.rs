//! # OrderedBreedStrategy
//!
//! Pairs the selected parents at random, recombines each pair with the
//! crossover probability, mutates every individual and finally evaluates the
//! whole generation under the current challenge.
use tracing::debug;

use super::BreedStrategy;
use crate::{
    error::{GeneticError, Result},
    evolution::{options::EvolutionOptions, population::evaluate_population, Challenge},
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
};

#[derive(Debug, Clone, Default)]
pub struct OrderedBreedStrategy {
    // No fields needed
}

impl OrderedBreedStrategy {
    /// Creates a new `OrderedBreedStrategy` instance.
    pub fn new() -> Self {
        Self {}
    }

    /// Recombines `parents` in random disjoint pairs.
    ///
    /// Dominance is resolved on every parent first. Each pair is replaced by
    /// its two unevaluated children with `probability`, and otherwise passes
    /// through unchanged. With an odd number of parents the one left without a
    /// partner passes through as well.
    pub fn crossover<P: Phenotype>(
        &self,
        mut parents: Vec<P>,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<P>> {
        for parent in &mut parents {
            parent.resolve_dominance();
        }
        rng.shuffle(&mut parents);

        let mut children = Vec::with_capacity(parents.len());
        let mut crossings = 0;
        let mut pairs = parents.chunks_exact(2);
        for pair in &mut pairs {
            if rng.probability() < probability {
                let (c1, c2) = pair[0].crossover(&pair[1], rng)?;
                children.push(c1);
                children.push(c2);
                crossings += 1;
            } else {
                children.extend_from_slice(pair);
            }
        }
        children.extend_from_slice(pairs.remainder());

        debug!(
            pairs = parents.len() / 2,
            crossings, "Recombined parent pairs"
        );
        Ok(children)
    }

    /// Mutates every individual with per-gene `probability`. Fitness of every
    /// individual is discarded, evaluated or not.
    pub fn mutate<P: Phenotype>(
        &self,
        mut population: Vec<P>,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<P> {
        for individual in &mut population {
            individual.mutate(probability, rng);
        }
        population
    }
}

impl<Pheno> BreedStrategy<Pheno> for OrderedBreedStrategy
where
    Pheno: Phenotype,
{
    fn breed<C: Challenge + ?Sized>(
        &self,
        parents: Vec<Pheno>,
        evol_options: &EvolutionOptions,
        challenge: &C,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Pheno>> {
        if parents.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let children = self.crossover(parents, evol_options.get_crossover_probability(), rng)?;
        let mut mutants = self.mutate(children, evol_options.get_mutation_probability(), rng);
        evaluate_population(&mut mutants, challenge, evol_options.get_parallel_threshold());

        Ok(mutants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::is_permutation;
    use crate::salesman::{Ploidy, Salesman};

    struct Identity;

    impl Challenge for Identity {
        fn score(&self, tour: &[usize]) -> f64 {
            tour.iter()
                .enumerate()
                .filter(|&(position, &city)| position == city)
                .count() as f64
        }
    }

    fn population(ploidy: Ploidy, size: usize, rng: &mut RandomNumberGenerator) -> Vec<Salesman> {
        (0..size)
            .map(|_| Salesman::random(ploidy, 8, rng).evaluated(&Identity))
            .collect()
    }

    #[test]
    fn test_crossover_without_probability_passes_parents() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let parents = population(Ploidy::Haploid, 6, &mut rng);
        let strategy = OrderedBreedStrategy::new();

        let children = strategy.crossover(parents.clone(), 0.0, &mut rng).unwrap();
        assert_eq!(children.len(), 6);
        // Parents keep their fitness when they pass through.
        assert!(children.iter().all(|c| c.fitness().is_some()));

        let mut expected: Vec<Vec<usize>> = parents.iter().map(|p| p.sequence().to_vec()).collect();
        let mut actual: Vec<Vec<usize>> = children.iter().map(|c| c.sequence().to_vec()).collect();
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_crossover_always_defers_fitness() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let parents = population(Ploidy::Diploid, 6, &mut rng);
        let strategy = OrderedBreedStrategy::new();

        let children = strategy.crossover(parents, 1.0, &mut rng).unwrap();
        assert_eq!(children.len(), 6);
        for child in &children {
            assert_eq!(child.fitness(), None);
            for strand in child.strands() {
                assert!(is_permutation(strand.sequence(), 8));
            }
        }
    }

    #[test]
    fn test_crossover_odd_parent_passes_through() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let parents = population(Ploidy::Haploid, 5, &mut rng);
        let strategy = OrderedBreedStrategy::new();

        let children = strategy.crossover(parents, 1.0, &mut rng).unwrap();
        assert_eq!(children.len(), 5);
        assert_eq!(children.iter().filter(|c| c.fitness().is_some()).count(), 1);
    }

    #[test]
    fn test_crossover_resolves_dominance() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let parents = population(Ploidy::Diploid, 4, &mut rng);
        let strategy = OrderedBreedStrategy::new();

        let passed = strategy.crossover(parents, 0.0, &mut rng).unwrap();
        for salesman in &passed {
            let strands = salesman.strands();
            assert!(strands[0].fitness().unwrap() >= strands[1].fitness().unwrap());
        }
    }

    #[test]
    fn test_breed_evaluates_everyone() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let parents = population(Ploidy::Diploid, 8, &mut rng);
        let options = EvolutionOptions::builder()
            .crossover_probability(0.9)
            .mutation_probability(0.1)
            .build();

        let offspring = OrderedBreedStrategy::new()
            .breed(parents, &options, &Identity, &mut rng)
            .unwrap();
        assert_eq!(offspring.len(), 8);
        assert!(offspring.iter().all(|s| s.is_evaluated()));
    }

    #[test]
    fn test_breed_empty_parents() {
        let mut rng = RandomNumberGenerator::new();
        let options = EvolutionOptions::default();
        let result = OrderedBreedStrategy::new().breed(
            Vec::<Salesman>::new(),
            &options,
            &Identity,
            &mut rng,
        );

        match result {
            Err(GeneticError::EmptyPopulation) => (),
            _ => panic!("Expected EmptyPopulation error"),
        }
    }

    #[test]
    fn test_breed_mixed_ploidy_fails() {
        let mut rng = RandomNumberGenerator::from_seed(6);
        let parents = vec![
            Salesman::random(Ploidy::Haploid, 5, &mut rng).evaluated(&Identity),
            Salesman::random(Ploidy::Diploid, 5, &mut rng).evaluated(&Identity),
        ];
        let options = EvolutionOptions::builder().crossover_probability(1.0).build();

        let result = OrderedBreedStrategy::new().breed(parents, &options, &Identity, &mut rng);
        assert!(matches!(result, Err(GeneticError::Breeding(_))));
    }
}
