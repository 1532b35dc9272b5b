//! Distance metrics for endpoint matching.
//!
//! The matching algorithm is metric-agnostic: callers pick a
//! [`DistanceMetric`] and both candidate search and the tolerance
//! comparison use it consistently. The two metrics produce distances in
//! different units, so a tolerance tuned for one is not meaningful under
//! the other.

use geo::line_measures::Distance;
use geo::{Euclidean, Haversine};
use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Selects how endpoint distances are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Euclidean distance in the coordinate units of the input data.
    /// No reprojection is performed.
    #[default]
    Planar,

    /// Great-circle distance in meters, treating coordinates as
    /// (longitude, latitude) in degrees.
    GreatCircle,
}

impl DistanceMetric {
    /// Distance between two points under this metric.
    #[must_use]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        let a = geo::Point::new(a.x, a.y);
        let b = geo::Point::new(b.x, b.y);
        match self {
            Self::Planar => Euclidean.distance(a, b),
            Self::GreatCircle => Haversine.distance(a, b),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_planar() {
        assert_eq!(DistanceMetric::default(), DistanceMetric::Planar);
    }

    #[test]
    fn planar_distance() {
        let d = DistanceMetric::Planar.distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn planar_distance_to_self_is_zero() {
        let p = Point::new(7.0, 11.0);
        assert!(DistanceMetric::Planar.distance(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn great_circle_distance_is_in_meters() {
        // One degree of longitude along the equator is roughly 111.2 km.
        let d = DistanceMetric::GreatCircle.distance(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!(
            (111_100.0..111_300.0).contains(&d),
            "expected ~111.2 km, got {d} m"
        );
    }

    #[test]
    fn great_circle_distance_to_self_is_zero() {
        let p = Point::new(-73.98, 40.75);
        assert!(DistanceMetric::GreatCircle.distance(p, p).abs() < 1e-9);
    }

    #[test]
    fn metrics_disagree_on_degree_coordinates() {
        // A gap of 1e-3 degrees is tiny in planar units but over a
        // hundred meters on the ground.
        let a = Point::new(10.0, 45.0);
        let b = Point::new(10.001, 45.0);
        let planar = DistanceMetric::Planar.distance(a, b);
        let great_circle = DistanceMetric::GreatCircle.distance(a, b);
        assert!(planar < 0.01, "planar gap should be ~1e-3, got {planar}");
        assert!(
            great_circle > 50.0,
            "great-circle gap should be tens of meters, got {great_circle}"
        );
    }
}
