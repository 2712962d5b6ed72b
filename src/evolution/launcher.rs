use tracing::{debug, info, instrument};

use super::{
    challenge::TourChallenge,
    options::{EvolutionOptions, LogLevel},
    population::{best, build_initial_population, evaluate_population, fitness_stats},
    Challenge,
};
use crate::{
    cities::CityMap,
    error::{GeneticError, OptionExt, Result},
    geometry::Region,
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
    salesman::Salesman,
    selection::{SelectionStrategy, TournamentSelection},
    strategy::{BreedStrategy, OrderedBreedStrategy},
    travel::{RegionSpeed, TravelModel, VelocityRegime},
};

/// Runs one generation: tournament selection of a full population, then
/// pairwise ordered crossover, swap mutation and evaluation under
/// `challenge`.
///
/// There is no elitism; the fittest individual may be lost.
///
/// # Errors
///
/// Fails if the options are invalid, the population is empty or contains an
/// unevaluated individual, or two selected parents cannot be recombined.
pub fn evolve<P, C>(
    population: &[P],
    options: &EvolutionOptions,
    challenge: &C,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<P>>
where
    P: Phenotype,
    C: Challenge + ?Sized,
{
    options.validate()?;
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    let selection = TournamentSelection::new(options.get_tournament_size())?;
    let selected = selection.select(population, population.len(), rng)?;
    OrderedBreedStrategy::new().breed(selected, options, challenge, rng)
}

/// Best fitness of one generation together with the regime it was evaluated
/// under.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: f64,
    pub region_speed: RegionSpeed,
}

/// Represents the result of a run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// The fittest individual of the final generation.
    pub best: Salesman,
    /// Best fitness of generation 0 and of every bred generation.
    pub history: Vec<GenerationRecord>,
    /// The final generation.
    pub population: Vec<Salesman>,
    /// The in-region speed active during the final generation.
    pub region_speed: RegionSpeed,
}

impl EvolutionResult {
    /// Travel time of the best individual in hours.
    pub fn best_time(&self) -> Option<f64> {
        self.best.fitness().map(|fitness| 1.0 / fitness)
    }
}

/// Manages a whole run over a fixed city set and region, switching the
/// in-region velocity between generations.
///
/// Selection is a tournament sized by the options of each run, so one
/// launcher can drive runs with different settings.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<'a, Strategy>
where
    Strategy: BreedStrategy<Salesman>,
{
    cities: &'a CityMap,
    region: Region,
    regime: VelocityRegime,
    strategy: Strategy,
}

impl<'a> EvolutionLauncher<'a, OrderedBreedStrategy> {
    /// A launcher breeding with ordered crossover.
    pub fn standard(cities: &'a CityMap, region: Region, regime: VelocityRegime) -> Self {
        Self::new(cities, region, regime, OrderedBreedStrategy::new())
    }
}

impl<'a, Strategy> EvolutionLauncher<'a, Strategy>
where
    Strategy: BreedStrategy<Salesman>,
{
    pub fn new(
        cities: &'a CityMap,
        region: Region,
        regime: VelocityRegime,
        strategy: Strategy,
    ) -> Self {
        Self {
            cities,
            region,
            regime,
            strategy,
        }
    }

    pub fn cities(&self) -> &CityMap {
        self.cities
    }

    pub fn regime(&self) -> &VelocityRegime {
        &self.regime
    }

    /// The travel model in effect while `active` is the in-region speed.
    pub fn model(&self, active: RegionSpeed) -> TravelModel {
        self.regime.model(self.region, active)
    }

    pub fn challenge(&self, active: RegionSpeed) -> TourChallenge<'a> {
        TourChallenge::new(self.cities, self.model(active))
    }

    /// Builds generation 0 under the initial (minimum) in-region speed.
    pub fn initial_population(
        &self,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Salesman>> {
        build_initial_population(options, &self.challenge(RegionSpeed::default()), rng)
    }

    /// Breeds one generation under the in-region speed `active`, selecting
    /// parents with a tournament of `options.get_tournament_size()`.
    pub fn step(
        &self,
        population: &[Salesman],
        options: &EvolutionOptions,
        active: RegionSpeed,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Salesman>> {
        let selection = TournamentSelection::new(options.get_tournament_size())?;
        let selected = selection.select(population, population.len(), rng)?;
        self.strategy
            .breed(selected, options, &self.challenge(active), rng)
    }

    /// Builds an initial population and evolves it.
    pub fn run(
        &self,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        let starters = self.initial_population(options, rng)?;
        self.run_from(starters, options, rng)
    }

    /// Evolves `starters` for `options.get_num_generations()` generations.
    ///
    /// Starters whose ploidy differs from `options.get_ploidy()` are converted
    /// first, so haploid and diploid runs can share one starting population.
    /// The in-region speed starts at its minimum and flips every
    /// `switch_period / 2` generations.
    ///
    /// # Errors
    ///
    /// Fails if the options are invalid, `starters` is empty or breeding fails.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            generations = options.get_num_generations(),
            population = starters.len(),
            ploidy = ?options.get_ploidy()
        )
    )]
    pub fn run_from(
        &self,
        starters: Vec<Salesman>,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        options.validate()?;
        if starters.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut active = RegionSpeed::default();
        let mut population: Vec<Salesman> = starters
            .into_iter()
            .map(|salesman| salesman.with_ploidy(options.get_ploidy(), rng))
            .collect();
        if population.iter().any(|salesman| !salesman.is_evaluated()) {
            evaluate_population(
                &mut population,
                &self.challenge(active),
                options.get_parallel_threshold(),
            );
        }

        let mut history = Vec::with_capacity(options.get_num_generations() + 1);
        history.push(self.record(0, &population, active, options.get_log_level())?);

        for generation in 1..=options.get_num_generations() {
            if self.regime.switches_before(generation) {
                active = active.toggled();
                if options.get_log_level() == LogLevel::Verbose {
                    debug!(
                        generation,
                        region_velocity = self.regime.region_velocity(active),
                        "Switched in-region velocity"
                    );
                }
            }

            population = self
                .step(&population, options, active, rng)
                .map_err(|e| {
                    GeneticError::Breeding(format!(
                        "Failed to breed generation {}: {}",
                        generation, e
                    ))
                })?;

            history.push(self.record(generation, &population, active, options.get_log_level())?);
        }

        let best = best(&population).cloned().ok_or_else_genetic(|| {
            GeneticError::Evolution(
                "Evolution completed but no evaluated individual remained".to_string(),
            )
        })?;

        Ok(EvolutionResult {
            best,
            history,
            population,
            region_speed: active,
        })
    }

    fn record(
        &self,
        generation: usize,
        population: &[Salesman],
        active: RegionSpeed,
        log_level: LogLevel,
    ) -> Result<GenerationRecord> {
        let best_fitness = best(population)
            .and_then(|salesman| salesman.fitness())
            .ok_or_else_genetic(|| {
                GeneticError::Evolution(format!(
                    "No evaluated individual in generation {}",
                    generation
                ))
            })?;

        match log_level {
            LogLevel::Minimal => info!(
                generation,
                best_fitness,
                best_hours = 1.0 / best_fitness,
                region_speed = ?active,
                "Generation"
            ),
            LogLevel::Verbose => {
                info!(
                    generation,
                    best_fitness,
                    best_hours = 1.0 / best_fitness,
                    region_speed = ?active,
                    "Generation"
                );
                if let Some(stats) = fitness_stats(population) {
                    debug!(
                        generation,
                        mean = stats.mean,
                        worst = stats.worst,
                        region_velocity = self.regime.region_velocity(active),
                        "Population fitness"
                    );
                }
            }
            LogLevel::None => {}
        }

        Ok(GenerationRecord {
            generation,
            best_fitness,
            region_speed: active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::operators::is_permutation;
    use crate::salesman::Ploidy;

    fn pentagon() -> CityMap {
        CityMap::new([
            ("a", Point::new(0.0, 0.0)),
            ("b", Point::new(0.02, 0.0)),
            ("c", Point::new(0.025, 0.015)),
            ("d", Point::new(0.01, 0.03)),
            ("e", Point::new(-0.005, 0.015)),
            ("f", Point::new(0.012, 0.01)),
        ])
        .unwrap()
    }

    fn region() -> Region {
        Region::new(Point::new(0.012, 0.012), 0.006).unwrap()
    }

    #[test]
    fn test_evolve_keeps_size_and_permutations() {
        let cities = pentagon();
        let regime = VelocityRegime::default();
        let challenge = TourChallenge::new(&cities, regime.model(region(), RegionSpeed::Min));
        let options = EvolutionOptions::builder()
            .population_size(10)
            .mutation_probability(0.1)
            .build();
        let mut rng = RandomNumberGenerator::from_seed(21);

        let mut population = build_initial_population(&options, &challenge, &mut rng).unwrap();
        for _ in 0..5 {
            population = evolve(&population, &options, &challenge, &mut rng).unwrap();
            assert_eq!(population.len(), 10);
            for salesman in &population {
                assert!(salesman.is_evaluated());
                assert!(is_permutation(salesman.sequence(), cities.len()));
            }
        }
    }

    #[test]
    fn test_evolve_rejects_empty_and_invalid() {
        let cities = pentagon();
        let challenge = TourChallenge::new(
            &cities,
            VelocityRegime::default().model(region(), RegionSpeed::Min),
        );
        let mut rng = RandomNumberGenerator::new();

        let empty: Vec<Salesman> = Vec::new();
        let result = evolve(&empty, &EvolutionOptions::default(), &challenge, &mut rng);
        assert!(matches!(result, Err(GeneticError::EmptyPopulation)));

        let population = vec![Salesman::haploid(vec![0, 1, 2, 3, 4, 5]).evaluated(&challenge); 2];
        let options = EvolutionOptions::builder().tournament_size(0).build();
        let result = evolve(&population, &options, &challenge, &mut rng);
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_run_records_every_generation() {
        let cities = pentagon();
        let regime = VelocityRegime::new(70.0, 20.0, 90.0, 4).unwrap();
        let options = EvolutionOptions::builder()
            .num_generations(6)
            .population_size(8)
            .build();
        let launcher = EvolutionLauncher::standard(&cities, region(), regime);
        let mut rng = RandomNumberGenerator::from_seed(22);

        let result = launcher.run(&options, &mut rng).unwrap();
        assert_eq!(result.history.len(), 7);
        assert_eq!(result.population.len(), 8);

        let speeds: Vec<RegionSpeed> = result.history.iter().map(|r| r.region_speed).collect();
        use RegionSpeed::{Max, Min};
        assert_eq!(speeds, vec![Min, Min, Min, Max, Max, Min, Min]);
        assert_eq!(result.region_speed, Min);
    }

    #[test]
    fn test_run_best_is_consistent_with_final_model() {
        let cities = pentagon();
        let regime = VelocityRegime::new(70.0, 20.0, 90.0, 6).unwrap();
        let options = EvolutionOptions::builder()
            .num_generations(5)
            .population_size(12)
            .ploidy(Ploidy::Diploid)
            .build();
        let launcher = EvolutionLauncher::standard(&cities, region(), regime);
        let mut rng = RandomNumberGenerator::from_seed(23);

        let result = launcher.run(&options, &mut rng).unwrap();
        let challenge = launcher.challenge(result.region_speed);
        let expected = challenge.score(result.best.best_sequence());
        assert_eq!(result.best.fitness(), Some(expected));
        assert_eq!(result.history.last().unwrap().best_fitness, expected);
        assert!((result.best_time().unwrap() - challenge.time(result.best.best_sequence())).abs() < 1e-9);
    }

    #[test]
    fn test_run_from_converts_ploidy() {
        let cities = pentagon();
        let regime = VelocityRegime::default();
        let haploid = EvolutionOptions::builder()
            .num_generations(2)
            .population_size(6)
            .build();
        let launcher = EvolutionLauncher::standard(&cities, region(), regime);
        let mut rng = RandomNumberGenerator::from_seed(24);
        let starters = launcher.initial_population(&haploid, &mut rng).unwrap();

        let mut diploid = haploid.clone();
        diploid.set_ploidy(Ploidy::Diploid);
        let result = launcher.run_from(starters.clone(), &diploid, &mut rng).unwrap();
        assert!(result.population.iter().all(|s| s.ploidy() == Ploidy::Diploid));

        let result = launcher.run_from(starters, &haploid, &mut rng).unwrap();
        assert!(result.population.iter().all(|s| s.ploidy() == Ploidy::Haploid));
    }

    #[test]
    fn test_run_from_uses_tournament_size_of_options() {
        let cities = pentagon();
        let launcher = EvolutionLauncher::standard(&cities, region(), VelocityRegime::default());
        let base = EvolutionOptions::builder()
            .num_generations(4)
            .population_size(12)
            .crossover_probability(0.0)
            .mutation_probability(0.0)
            .tournament_size(4)
            .build();
        let starters = launcher
            .initial_population(&base, &mut RandomNumberGenerator::from_seed(9))
            .unwrap();
        let initial_best = best(&starters).and_then(|s| s.fitness()).unwrap();

        // Without crossover or mutation a huge tournament only ever copies
        // the fittest starters.
        let mut greedy = base.clone();
        greedy.set_tournament_size(500);
        let result = launcher
            .run_from(starters.clone(), &greedy, &mut RandomNumberGenerator::from_seed(9))
            .unwrap();
        assert!(result.history.iter().all(|r| r.best_fitness == initial_best));
        assert!(result.population.iter().all(|s| s.fitness() == Some(initial_best)));

        // A tournament of one is a uniform draw and keeps weaker tours around.
        let mut uniform = base.clone();
        uniform.set_tournament_size(1);
        let result = launcher
            .run_from(starters, &uniform, &mut RandomNumberGenerator::from_seed(9))
            .unwrap();
        assert!(result.population.iter().any(|s| s.fitness() != Some(initial_best)));
    }

    #[test]
    fn test_step_rejects_zero_tournament_size() {
        let cities = pentagon();
        let launcher = EvolutionLauncher::standard(&cities, region(), VelocityRegime::default());
        let options = EvolutionOptions::builder().population_size(4).build();
        let mut rng = RandomNumberGenerator::from_seed(10);
        let population = launcher.initial_population(&options, &mut rng).unwrap();

        let mut invalid = options.clone();
        invalid.set_tournament_size(0);
        let result = launcher.step(&population, &invalid, RegionSpeed::Min, &mut rng);
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_run_with_invalid_options() {
        let cities = pentagon();
        let options = EvolutionOptions::builder().population_size(0).build();
        let launcher = EvolutionLauncher::new(
            &cities,
            region(),
            VelocityRegime::default(),
            OrderedBreedStrategy::new(),
        );
        let mut rng = RandomNumberGenerator::new();

        match launcher.run(&options, &mut rng) {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"));
            }
            other => panic!("Expected Configuration error, got {:?}", other.map(|r| r.best)),
        }
    }
}
