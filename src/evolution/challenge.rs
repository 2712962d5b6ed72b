use crate::cities::CityMap;
use crate::travel::{fitness_from_time, TravelModel};

/// Scores a tour, given as indices into a fixed city set. Higher is better.
pub trait Challenge: Send + Sync {
    fn score(&self, tour: &[usize]) -> f64;
}

/// Fitness of a tour under one generation's travel model: the inverse of the
/// total travel time.
#[derive(Debug, Clone, Copy)]
pub struct TourChallenge<'a> {
    cities: &'a CityMap,
    model: TravelModel,
}

impl<'a> TourChallenge<'a> {
    pub fn new(cities: &'a CityMap, model: TravelModel) -> Self {
        Self { cities, model }
    }

    pub fn cities(&self) -> &CityMap {
        self.cities
    }

    pub fn model(&self) -> &TravelModel {
        &self.model
    }

    /// Total travel time of `tour` in hours.
    pub fn time(&self, tour: &[usize]) -> f64 {
        self.model.tour_time(self.cities.points(tour))
    }
}

impl Challenge for TourChallenge<'_> {
    fn score(&self, tour: &[usize]) -> f64 {
        fitness_from_time(self.time(tour))
    }
}
