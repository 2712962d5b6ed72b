//! # Geometry
//!
//! Planar points and the circular region. Coordinates are the output of an
//! equirectangular projection, expressed in radians, so multiplying a planar
//! distance by [`EARTH_RADIUS_KM`] yields kilometres.

use crate::error::{GeneticError, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A projected 2-D coordinate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Projects a latitude/longitude pair (degrees) onto the plane using an
    /// equirectangular projection around `origin_lat`/`origin_lon`.
    ///
    /// `x` is scaled by the cosine of the standard parallel; `y` is the raw
    /// latitude in radians.
    pub fn from_lat_lon(lat: f64, lon: f64, origin_lat: f64, origin_lon: f64) -> Self {
        let x = (lon.to_radians() - origin_lon.to_radians()) * origin_lat.to_radians().cos();
        let y = lat.to_radians();
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Point at parameter `t` along the segment from `self` to `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    /// Planar distance.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Distance in kilometres.
    pub fn distance_km(self, other: Point) -> f64 {
        self.distance(other) * EARTH_RADIUS_KM
    }
}

/// The circular area in which the alternate velocity applies.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    center: Point,
    radius: f64,
}

impl Region {
    /// Creates a region, rejecting a non-finite centre or a radius that is
    /// negative or not finite. A zero radius is a region nothing ever enters.
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(GeneticError::InvalidNumericValue(format!(
                "Region centre must be finite, got ({}, {})",
                center.x, center.y
            )));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Region radius must be finite and non-negative, got {}",
                radius
            )));
        }

        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Roughly 300 km around the geographical centre of Poland, projected
    /// around 50N 9E like the EU capitals dataset.
    pub fn poland() -> Self {
        Self {
            center: Point::from_lat_lon(52.0, 19.0, 50.0, 9.0),
            radius: 0.047,
        }
    }

    /// Boundary points count as inside.
    pub fn contains(&self, point: Point) -> bool {
        point.distance(self.center) <= self.radius
    }
}

/// Closed-loop planar length of `points`, including the edge back to the start.
pub fn path_length(points: &[Point]) -> f64 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p1, p2)| p1.distance(*p2))
        .sum()
}
