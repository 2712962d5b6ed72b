//! # Salesman
//!
//! A candidate tour. A haploid salesman carries one strand (a permutation of
//! city indices); a diploid salesman carries two competing strands, each with
//! its own fitness, and is as fit as its fitter strand.
//!
//! ## Example
//!
//! ```rust
//! use slowzone::cities::CityMap;
//! use slowzone::evolution::TourChallenge;
//! use slowzone::geometry::Region;
//! use slowzone::phenotype::Phenotype;
//! use slowzone::rng::RandomNumberGenerator;
//! use slowzone::salesman::{Ploidy, Salesman};
//! use slowzone::travel::{RegionSpeed, VelocityRegime};
//!
//! let cities = CityMap::eu_capitals();
//! let model = VelocityRegime::default().model(Region::poland(), RegionSpeed::Min);
//! let challenge = TourChallenge::new(&cities, model);
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let salesman = Salesman::random(Ploidy::Diploid, cities.len(), &mut rng).evaluated(&challenge);
//! let strands = salesman.strands();
//! assert_eq!(strands.len(), 2);
//! assert_eq!(
//!     salesman.fitness(),
//!     Some(strands[0].fitness().unwrap().max(strands[1].fitness().unwrap()))
//! );
//! ```

use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;
use crate::operators::{ordered_crossover, swap_mutation};
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// Number of strands per individual.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ploidy {
    #[default]
    Haploid,
    Diploid,
}

impl Ploidy {
    pub fn strand_count(self) -> usize {
        match self {
            Ploidy::Haploid => 1,
            Ploidy::Diploid => 2,
        }
    }
}

/// One permutation of the cities together with its fitness, if computed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Strand {
    sequence: Vec<usize>,
    fitness: Option<f64>,
}

impl Strand {
    /// Creates an unevaluated strand.
    pub fn new(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            fitness: None,
        }
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn evaluate<C: Challenge + ?Sized>(&mut self, challenge: &C) {
        self.fitness = Some(challenge.score(&self.sequence));
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Salesman {
    strands: Vec<Strand>,
}

impl Salesman {
    /// An unevaluated haploid salesman.
    pub fn haploid(sequence: Vec<usize>) -> Self {
        Self {
            strands: vec![Strand::new(sequence)],
        }
    }

    /// An unevaluated diploid salesman. `first` is the strand treated as
    /// dominant until dominance is resolved.
    pub fn diploid(first: Vec<usize>, second: Vec<usize>) -> Self {
        Self {
            strands: vec![Strand::new(first), Strand::new(second)],
        }
    }

    /// An unevaluated salesman built around `sequence`. A diploid salesman
    /// gets an independent random permutation as its second strand.
    pub fn from_sequence(
        ploidy: Ploidy,
        sequence: Vec<usize>,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        match ploidy {
            Ploidy::Haploid => Self::haploid(sequence),
            Ploidy::Diploid => {
                let second = rng.permutation(sequence.len());
                Self::diploid(sequence, second)
            }
        }
    }

    /// An unevaluated salesman whose strands are independent random
    /// permutations of `0..num_cities`.
    pub fn random(ploidy: Ploidy, num_cities: usize, rng: &mut RandomNumberGenerator) -> Self {
        let sequence = rng.permutation(num_cities);
        Self::from_sequence(ploidy, sequence, rng)
    }

    /// Evaluates every strand and returns the salesman.
    pub fn evaluated<C: Challenge + ?Sized>(mut self, challenge: &C) -> Self {
        Phenotype::evaluate(&mut self, challenge);
        self
    }

    pub fn ploidy(&self) -> Ploidy {
        if self.strands.len() == Ploidy::Diploid.strand_count() {
            Ploidy::Diploid
        } else {
            Ploidy::Haploid
        }
    }

    pub fn strands(&self) -> &[Strand] {
        &self.strands
    }

    /// The first strand; for a diploid salesman after dominance resolution,
    /// the dominant one.
    pub fn sequence(&self) -> &[usize] {
        &self.strands[0].sequence
    }

    /// The fittest evaluated strand, falling back to the first strand when
    /// none is evaluated.
    pub fn best_strand(&self) -> &Strand {
        let mut best = &self.strands[0];
        for strand in &self.strands[1..] {
            let better = match (strand.fitness, best.fitness) {
                (Some(candidate), Some(current)) => candidate > current,
                (Some(_), None) => true,
                _ => false,
            };
            if better {
                best = strand;
            }
        }
        best
    }

    /// The sequence of [`Salesman::best_strand`].
    pub fn best_sequence(&self) -> &[usize] {
        &self.best_strand().sequence
    }

    pub fn is_evaluated(&self) -> bool {
        self.strands.iter().all(|strand| strand.fitness.is_some())
    }

    /// A copy of this salesman with the given ploidy.
    ///
    /// Going from haploid to diploid adds an unevaluated random strand, so the
    /// result needs evaluating. Going from diploid to haploid keeps the best
    /// strand with its fitness.
    pub fn with_ploidy(&self, ploidy: Ploidy, rng: &mut RandomNumberGenerator) -> Self {
        match (self.ploidy(), ploidy) {
            (Ploidy::Haploid, Ploidy::Diploid) => {
                let second = Strand::new(rng.permutation(self.sequence().len()));
                Self {
                    strands: vec![self.strands[0].clone(), second],
                }
            }
            (Ploidy::Diploid, Ploidy::Haploid) => Self {
                strands: vec![self.best_strand().clone()],
            },
            _ => self.clone(),
        }
    }
}

impl Phenotype for Salesman {
    /// Crosses strand `i` of `self` with strand `i` of `other`, so a diploid
    /// pair recombines dominant with dominant and recessive with recessive.
    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
        if self.strands.len() != other.strands.len() {
            return Err(GeneticError::Breeding(format!(
                "Cannot cross a {:?} salesman with a {:?} one",
                self.ploidy(),
                other.ploidy()
            )));
        }

        let mut first = Vec::with_capacity(self.strands.len());
        let mut second = Vec::with_capacity(self.strands.len());
        for (a, b) in self.strands.iter().zip(&other.strands) {
            if a.sequence.len() != b.sequence.len() {
                return Err(GeneticError::Breeding(format!(
                    "Strand lengths differ: {} vs {}",
                    a.sequence.len(),
                    b.sequence.len()
                )));
            }
            let (c1, c2) = ordered_crossover(&a.sequence, &b.sequence, rng);
            first.push(Strand::new(c1));
            second.push(Strand::new(c2));
        }

        Ok((Self { strands: first }, Self { strands: second }))
    }

    fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator) {
        for strand in &mut self.strands {
            swap_mutation(&mut strand.sequence, probability, rng);
            strand.fitness = None;
        }
    }

    fn evaluate<C: Challenge + ?Sized>(&mut self, challenge: &C) {
        for strand in &mut self.strands {
            strand.evaluate(challenge);
        }
    }

    /// The highest strand fitness, or `None` while any strand is unevaluated.
    fn fitness(&self) -> Option<f64> {
        self.strands
            .iter()
            .map(|strand| strand.fitness)
            .try_fold(f64::NEG_INFINITY, |best, fitness| fitness.map(|f| best.max(f)))
    }

    /// Moves the fitter strand of a diploid salesman to the front.
    fn resolve_dominance(&mut self) {
        if self.strands.len() != 2 {
            return;
        }
        if let (Some(a), Some(b)) = (self.strands[0].fitness, self.strands[1].fitness) {
            if b > a {
                self.strands.swap(0, 1);
            }
        }
    }
}
