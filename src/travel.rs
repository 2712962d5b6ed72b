//! # Travel-time model
//!
//! Turns a closed tour into a total travel time. Every edge is intersected with
//! the slow-zone circle and the parts inside and outside of it are timed at
//! their own velocities.
//!
//! ## Example
//!
//! ```rust
//! use slowzone::geometry::{Point, Region};
//! use slowzone::travel::{RegionSpeed, VelocityRegime};
//!
//! let regime = VelocityRegime::new(70.0, 50.0, 80.0, 20).unwrap();
//! let model = regime.model(Region::new(Point::new(0.0, 0.0), 0.01).unwrap(), RegionSpeed::Min);
//!
//! let tour = [Point::new(0.02, 0.0), Point::new(0.03, 0.0)];
//! let hours = model.tour_time(tour.iter().copied());
//! assert!(hours > 0.0);
//! ```

use crate::error::{GeneticError, Result};
use crate::geometry::{Point, Region};

/// Which of the two in-region velocities is currently active.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionSpeed {
    #[default]
    Min,
    Max,
}

impl RegionSpeed {
    pub fn toggled(self) -> Self {
        match self {
            RegionSpeed::Min => RegionSpeed::Max,
            RegionSpeed::Max => RegionSpeed::Min,
        }
    }
}

/// Velocities (km/h) outside and inside the region, plus the number of
/// generations in one full min/max cycle of the in-region velocity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityRegime {
    outside: f64,
    region_min: f64,
    region_max: f64,
    switch_period: usize,
}

impl VelocityRegime {
    /// Creates a regime, rejecting velocities that are not strictly positive
    /// and finite.
    pub fn new(
        outside: f64,
        region_min: f64,
        region_max: f64,
        switch_period: usize,
    ) -> Result<Self> {
        for (name, value) in [
            ("outside", outside),
            ("region_min", region_min),
            ("region_max", region_max),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeneticError::Configuration(format!(
                    "Velocity {} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            outside,
            region_min,
            region_max,
            switch_period,
        })
    }

    pub fn outside(&self) -> f64 {
        self.outside
    }

    pub fn region_min(&self) -> f64 {
        self.region_min
    }

    pub fn region_max(&self) -> f64 {
        self.region_max
    }

    pub fn switch_period(&self) -> usize {
        self.switch_period
    }

    pub fn region_velocity(&self, active: RegionSpeed) -> f64 {
        match active {
            RegionSpeed::Min => self.region_min,
            RegionSpeed::Max => self.region_max,
        }
    }

    /// Whether the active in-region speed flips before breeding generation
    /// `generation` (1-based; generation 0 is the initial population).
    ///
    /// The speed flips every `switch_period / 2` generations and never when
    /// that half period is zero.
    pub fn switches_before(&self, generation: usize) -> bool {
        let half = self.switch_period / 2;
        half > 0 && generation > 1 && (generation - 1) % half == 0
    }

    /// Snapshot of the model for one generation.
    pub fn model(&self, region: Region, active: RegionSpeed) -> TravelModel {
        TravelModel {
            region,
            outside_velocity: self.outside,
            region_velocity: self.region_velocity(active),
        }
    }
}

impl Default for VelocityRegime {
    fn default() -> Self {
        Self {
            outside: 70.0,
            region_min: 50.0,
            region_max: 80.0,
            switch_period: 0,
        }
    }
}

/// Kilometres of one edge travelled inside and outside the region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeSplit {
    pub inside_km: f64,
    pub outside_km: f64,
}

impl EdgeSplit {
    fn inside(km: f64) -> Self {
        Self {
            inside_km: km,
            outside_km: 0.0,
        }
    }

    fn outside(km: f64) -> Self {
        Self {
            inside_km: 0.0,
            outside_km: km,
        }
    }
}

/// The travel-time model frozen for one generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelModel {
    pub region: Region,
    pub outside_velocity: f64,
    pub region_velocity: f64,
}

impl TravelModel {
    /// Splits the segment `p1 -> p2` at its intersections with the region
    /// boundary.
    ///
    /// Solves `|p1 + t(p2 - p1) - center|^2 = r^2` for `t`. Endpoints lying
    /// exactly on the boundary are not treated specially, so such edges are
    /// only approximately split.
    pub fn split_edge(&self, p1: Point, p2: Point) -> EdgeSplit {
        let center = self.region.center();
        let radius = self.region.radius();

        let l = p2.sub(p1);
        let a = l.dot(l);
        let b = 2.0 * l.dot(p1.sub(center));
        let c = p1.dot(p1) + center.dot(center) - 2.0 * p1.dot(center) - radius * radius;
        let delta = b * b - 4.0 * a * c;

        // No crossing or tangent. Also covers zero-length edges, where a == b == 0.
        if delta <= 0.0 {
            let km = p1.distance_km(p2);
            return if self.region.contains(p1) {
                EdgeSplit::inside(km)
            } else {
                EdgeSplit::outside(km)
            };
        }

        let root = delta.sqrt();
        let t1 = (-b - root) / (2.0 * a);
        let t2 = (-b + root) / (2.0 * a);
        let on_segment = |t: f64| 0.0 < t && t < 1.0;

        match (on_segment(t1), on_segment(t2)) {
            (true, true) => {
                let entry = p1.lerp(p2, t1);
                let exit = p1.lerp(p2, t2);
                EdgeSplit {
                    inside_km: entry.distance_km(exit),
                    outside_km: p1.distance_km(entry) + exit.distance_km(p2),
                }
            }
            (true, false) | (false, true) => {
                let t = if on_segment(t1) { t1 } else { t2 };
                let crossing = p1.lerp(p2, t);
                if self.region.contains(p1) {
                    EdgeSplit {
                        inside_km: p1.distance_km(crossing),
                        outside_km: crossing.distance_km(p2),
                    }
                } else {
                    EdgeSplit {
                        inside_km: crossing.distance_km(p2),
                        outside_km: p1.distance_km(crossing),
                    }
                }
            }
            (false, false) => {
                let km = p1.distance_km(p2);
                // The circle spans the whole segment: both endpoints are inside.
                if t1 <= 0.0 && t2 >= 1.0 {
                    EdgeSplit::inside(km)
                } else {
                    EdgeSplit::outside(km)
                }
            }
        }
    }

    /// Hours needed to travel `p1 -> p2`.
    pub fn edge_time(&self, p1: Point, p2: Point) -> f64 {
        let split = self.split_edge(p1, p2);
        split.inside_km / self.region_velocity + split.outside_km / self.outside_velocity
    }

    /// Hours needed to travel the closed loop through `points`, including the
    /// edge from the last point back to the first.
    pub fn tour_time<I>(&self, points: I) -> f64
    where
        I: IntoIterator<Item = Point>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();
        points
            .clone()
            .zip(points.cycle().skip(1))
            .map(|(p1, p2)| self.edge_time(p1, p2))
            .sum()
    }
}

/// `1 / time`, or positive infinity for a zero-time tour.
pub fn fitness_from_time(time: f64) -> f64 {
    if time == 0.0 {
        f64::INFINITY
    } else {
        1.0 / time
    }
}
