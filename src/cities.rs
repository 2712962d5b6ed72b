//! # Cities
//!
//! The fixed, ordered set of points a tour visits. Genomes store indices into a
//! `CityMap`, so its order must not change once a population exists.

use crate::error::{GeneticError, Result};
use crate::geometry::Point;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub point: Point,
}

/// An ordered mapping from city name to its projected point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityMap {
    cities: Vec<City>,
}

impl CityMap {
    /// Builds a map from `(name, point)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a name appears twice or a coordinate is
    /// not finite.
    pub fn new<I, S>(cities: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Point)>,
        S: Into<String>,
    {
        let mut map = Self::default();
        for (name, point) in cities {
            map.insert(name, point)?;
        }
        Ok(map)
    }

    /// Projects `(name, latitude, longitude)` triples around the given origin
    /// and orders them by name.
    pub fn from_lat_lon<I, S>(cities: I, origin_lat: f64, origin_lon: f64) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let mut projected: Vec<(String, Point)> = cities
            .into_iter()
            .map(|(name, lat, lon)| {
                (
                    name.into(),
                    Point::from_lat_lon(lat, lon, origin_lat, origin_lon),
                )
            })
            .collect();
        projected.sort_by(|a, b| a.0.cmp(&b.0));
        Self::new(projected)
    }

    fn insert<S: Into<String>>(&mut self, name: S, point: Point) -> Result<()> {
        let name = name.into();
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(GeneticError::InvalidNumericValue(format!(
                "City {} has a non-finite coordinate",
                name
            )));
        }
        if self.index_of(&name).is_some() {
            return Err(GeneticError::Configuration(format!(
                "City {} is listed twice",
                name
            )));
        }
        self.cities.push(City { name, point });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.cities.iter().position(|city| city.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    /// Point of the city at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn point(&self, index: usize) -> Point {
        self.cities[index].point
    }

    /// Points visited by `tour`, in order.
    pub fn points<'a>(&'a self, tour: &'a [usize]) -> impl Iterator<Item = Point> + Clone + 'a {
        tour.iter().map(move |&index| self.point(index))
    }

    /// City names visited by `tour`, in order.
    pub fn names<'a>(&'a self, tour: &'a [usize]) -> Vec<&'a str> {
        tour.iter()
            .map(|&index| self.cities[index].name.as_str())
            .collect()
    }

    /// The capitals of the 28 EU member states (as of 2016), rounded to whole
    /// degrees and projected around 50N 9E.
    pub fn eu_capitals() -> Self {
        const CAPITALS: [(&str, f64, f64); 28] = [
            ("Vienna", 48.0, 16.0),
            ("Brussels", 51.0, 4.0),
            ("Sofia", 43.0, 23.0),
            ("Zagreb", 46.0, 16.0),
            ("Nicosia", 35.0, 33.0),
            ("Prague", 50.0, 14.0),
            ("Copenhagen", 55.0, 13.0),
            ("Tallinn", 59.0, 25.0),
            ("Helsinki", 60.0, 25.0),
            ("Paris", 49.0, 2.0),
            ("Berlin", 53.0, 13.0),
            ("Athens", 38.0, 24.0),
            ("Budapest", 48.0, 19.0),
            ("Dublin", 53.0, -6.0),
            ("Rome", 42.0, 13.0),
            ("Riga", 57.0, 24.0),
            ("Vilnius", 55.0, 25.0),
            ("Luxembourg", 50.0, 6.0),
            ("Valletta", 36.0, 15.0),
            ("Amsterdam", 52.0, 5.0),
            ("Warsaw", 52.0, 21.0),
            ("Lisbon", 39.0, -9.0),
            ("Bucharest", 44.0, 26.0),
            ("Bratislava", 48.0, 17.0),
            ("Ljubljana", 46.0, 15.0),
            ("Madrid", 40.0, -4.0),
            ("Stockholm", 59.0, 18.0),
            ("London", 52.0, 0.0),
        ];

        let mut cities: Vec<(String, Point)> = CAPITALS
            .iter()
            .map(|&(name, lat, lon)| (name.to_string(), Point::from_lat_lon(lat, lon, 50.0, 9.0)))
            .collect();
        cities.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            cities: cities
                .into_iter()
                .map(|(name, point)| City { name, point })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_order() {
        let map = CityMap::new([
            ("b", Point::new(1.0, 0.0)),
            ("a", Point::new(0.0, 0.0)),
        ])
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.index_of("b"), Some(0));
        assert_eq!(map.names(&[1, 0]), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = CityMap::new([("a", Point::new(1.0, 0.0)), ("a", Point::new(0.0, 0.0))]);
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let result = CityMap::new([("a", Point::new(f64::NAN, 0.0))]);
        assert!(matches!(result, Err(GeneticError::InvalidNumericValue(_))));
    }

    #[test]
    fn test_from_lat_lon_sorts_by_name() {
        let map = CityMap::from_lat_lon([("Warsaw", 52.0, 21.0), ("Berlin", 53.0, 13.0)], 50.0, 9.0)
            .unwrap();
        assert_eq!(map.get(0).unwrap().name, "Berlin");
        assert_eq!(map.point(1), Point::from_lat_lon(52.0, 21.0, 50.0, 9.0));
    }

    #[test]
    fn test_eu_capitals() {
        let map = CityMap::eu_capitals();
        assert_eq!(map.len(), 28);
        assert_eq!(map.get(0).unwrap().name, "Amsterdam");
        let warsaw = map.index_of("Warsaw").unwrap();
        assert!(crate::geometry::Region::poland().contains(map.point(warsaw)));
        let paris = map.index_of("Paris").unwrap();
        assert!(!crate::geometry::Region::poland().contains(map.point(paris)));
    }

    #[test]
    fn test_points_follow_tour() {
        let map = CityMap::new([
            ("a", Point::new(0.0, 0.0)),
            ("b", Point::new(1.0, 0.0)),
            ("c", Point::new(2.0, 0.0)),
        ])
        .unwrap();
        let points: Vec<Point> = map.points(&[2, 0, 1]).collect();
        assert_eq!(points, vec![Point::new(2.0, 0.0), Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
    }
}
