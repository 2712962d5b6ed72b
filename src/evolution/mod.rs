pub mod challenge;
pub mod launcher;
pub mod options;
pub mod params;
pub mod population;

pub use challenge::{Challenge, TourChallenge};
pub use launcher::{evolve, EvolutionLauncher, EvolutionResult, GenerationRecord};
pub use options::{EvolutionOptions, LogLevel};
pub use params::RunParameters;
pub use population::{best, best_k, build_initial_population, evaluate_population};
