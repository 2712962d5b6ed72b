//! # RunParameters
//!
//! Plain-text run parameters, one value per line:
//!
//! ```text
//! [outside velocity]
//! first in-region velocity
//! second in-region velocity
//! switch period
//! generations
//! mutation probability
//! crossover probability
//! tournament size
//! population size
//! ```
//!
//! The outside velocity is optional and defaults to 70 km/h. Blank lines and
//! lines starting with `#` are ignored.
//!
//! ## Example
//!
//! ```rust
//! use slowzone::evolution::params::RunParameters;
//!
//! let params = RunParameters::parse("50\n80\n10\n300\n0.02\n0.9\n4\n200\n").unwrap();
//! let options = params.options();
//! let regime = params.regime().unwrap();
//!
//! assert_eq!(options.get_population_size(), 200);
//! assert_eq!(regime.outside(), 70.0);
//! ```

use std::fs;
use std::path::Path;

use tracing::warn;

use super::options::EvolutionOptions;
use crate::error::{GeneticError, Result};
use crate::salesman::Ploidy;
use crate::travel::VelocityRegime;

const DEFAULT_OUTSIDE_VELOCITY: f64 = 70.0;

const NAMES: [&str; 9] = [
    "outside velocity",
    "first in-region velocity",
    "second in-region velocity",
    "switch period",
    "generations",
    "mutation probability",
    "crossover probability",
    "tournament size",
    "population size",
];

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    pub outside_velocity: f64,
    /// In-region velocity active first.
    pub region_velocity_min: f64,
    pub region_velocity_max: f64,
    pub switch_period: usize,
    pub num_generations: usize,
    pub mutation_probability: f64,
    pub crossover_probability: f64,
    pub tournament_size: usize,
    pub population_size: usize,
}

impl RunParameters {
    /// Parses eight or nine values, see the module documentation.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a wrong number of values, a value
    /// that is not a number, or a count that is not a non-negative integer.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let (outside, rest) = match lines.len() {
            8 => (None, &lines[..]),
            9 => (Some(lines[0]), &lines[1..]),
            n => {
                return Err(GeneticError::Configuration(format!(
                    "Expected 8 or 9 parameter values, got {}",
                    n
                )))
            }
        };

        let outside_velocity = match outside {
            Some(value) => parse_float(NAMES[0], value)?,
            None => DEFAULT_OUTSIDE_VELOCITY,
        };
        let names = &NAMES[1..];

        Ok(Self {
            outside_velocity,
            region_velocity_min: parse_float(names[0], rest[0])?,
            region_velocity_max: parse_float(names[1], rest[1])?,
            switch_period: parse_count(names[2], rest[2])?,
            num_generations: parse_count(names[3], rest[3])?,
            mutation_probability: parse_float(names[4], rest[4])?,
            crossover_probability: parse_float(names[5], rest[5])?,
            tournament_size: parse_count(names[6], rest[6])?,
            population_size: parse_count(names[7], rest[7])?,
        })
    }

    /// Reads and parses a parameter file.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Io` if the file cannot be read, otherwise the
    /// errors of [`RunParameters::parse`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), "Failed to read parameters: {}", e);
            GeneticError::from(e)
        })?;
        Self::parse(&text)
    }

    /// The velocity regime described by these parameters.
    pub fn regime(&self) -> Result<VelocityRegime> {
        VelocityRegime::new(
            self.outside_velocity,
            self.region_velocity_min,
            self.region_velocity_max,
            self.switch_period,
        )
    }

    /// Haploid evolution options with every other setting at its default.
    pub fn options(&self) -> EvolutionOptions {
        self.options_with_ploidy(Ploidy::Haploid)
    }

    pub fn options_with_ploidy(&self, ploidy: Ploidy) -> EvolutionOptions {
        EvolutionOptions::builder()
            .num_generations(self.num_generations)
            .population_size(self.population_size)
            .mutation_probability(self.mutation_probability)
            .crossover_probability(self.crossover_probability)
            .tournament_size(self.tournament_size)
            .ploidy(ploidy)
            .build()
    }
}

fn parse_float(name: &str, value: &str) -> Result<f64> {
    let parsed: f64 = value.parse().map_err(|_| {
        GeneticError::Configuration(format!("Invalid {}: '{}' is not a number", name, value))
    })?;
    if !parsed.is_finite() {
        return Err(GeneticError::InvalidNumericValue(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(parsed)
}

fn parse_count(name: &str, value: &str) -> Result<usize> {
    let parsed = parse_float(name, value)?;
    if parsed < 0.0 || parsed.fract() != 0.0 {
        return Err(GeneticError::Configuration(format!(
            "Invalid {}: expected a non-negative integer, got {}",
            name, value
        )));
    }
    Ok(parsed as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EIGHT: &str = "50\n80\n10\n300\n0.02\n0.9\n4\n200\n";

    #[test]
    fn test_parse_eight_values() {
        let params = RunParameters::parse(EIGHT).unwrap();
        assert_eq!(params.outside_velocity, 70.0);
        assert_eq!(params.region_velocity_min, 50.0);
        assert_eq!(params.region_velocity_max, 80.0);
        assert_eq!(params.switch_period, 10);
        assert_eq!(params.num_generations, 300);
        assert_eq!(params.mutation_probability, 0.02);
        assert_eq!(params.crossover_probability, 0.9);
        assert_eq!(params.tournament_size, 4);
        assert_eq!(params.population_size, 200);
    }

    #[test]
    fn test_parse_nine_values_with_comments() {
        let text = "# velocities\n90.5\n20\n100\n\n6\n50\n0.1\n0.8\n3\n7.0\n";
        let params = RunParameters::parse(text).unwrap();
        assert_eq!(params.outside_velocity, 90.5);
        assert_eq!(params.region_velocity_min, 20.0);
        assert_eq!(params.switch_period, 6);
        assert_eq!(params.population_size, 7);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            RunParameters::parse("1\n2\n3"),
            Err(GeneticError::Configuration(_))
        ));
        assert!(matches!(
            RunParameters::parse("50\n80\nten\n300\n0.02\n0.9\n4\n200"),
            Err(GeneticError::Configuration(_))
        ));
        assert!(matches!(
            RunParameters::parse("50\n80\n10\n300\n0.02\n0.9\n4.5\n200"),
            Err(GeneticError::Configuration(_))
        ));
        assert!(matches!(
            RunParameters::parse("50\n80\n10\n-3\n0.02\n0.9\n4\n200"),
            Err(GeneticError::Configuration(_))
        ));
        assert!(matches!(
            RunParameters::parse("inf\n80\n10\n3\n0.02\n0.9\n4\n200"),
            Err(GeneticError::InvalidNumericValue(_))
        ));
    }

    #[test]
    fn test_conversions() {
        let params = RunParameters::parse(EIGHT).unwrap();
        let regime = params.regime().unwrap();
        assert_eq!(regime.region_min(), 50.0);
        assert_eq!(regime.region_max(), 80.0);
        assert_eq!(regime.switch_period(), 10);

        let options = params.options_with_ploidy(Ploidy::Diploid);
        assert_eq!(options.get_num_generations(), 300);
        assert_eq!(options.get_tournament_size(), 4);
        assert_eq!(options.get_ploidy(), Ploidy::Diploid);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_velocity_rejected_by_regime() {
        let params = RunParameters::parse("0\n80\n10\n300\n0.02\n0.9\n4\n200").unwrap();
        assert!(params.regime().is_err());
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("slowzone-params-{}.txt", std::process::id()));
        fs::write(&path, EIGHT).unwrap();
        let params = RunParameters::from_path(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(params.unwrap(), RunParameters::parse(EIGHT).unwrap());
    }

    #[test]
    fn test_missing_file() {
        let result = RunParameters::from_path("/nonexistent/params.txt");
        match result {
            Err(GeneticError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
