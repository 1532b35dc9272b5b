//! Shared types for the restitch chain-assembly crates.

use serde::{Deserialize, Serialize};

use crate::metric::DistanceMetric;
use crate::project::OutputMode;

/// A 2D point.
///
/// Coordinates are either planar units or (longitude, latitude) degrees,
/// depending on the [`DistanceMetric`] the caller assembles with. The
/// point itself carries no unit information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (or longitude in degrees).
    pub x: f64,
    /// Vertical position (or latitude in degrees).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An ordered sequence of points forming one line fragment.
///
/// The first point is the fragment's start, the last its end. A
/// single-point polyline is degenerate: start and end coincide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Reverse the point order in place, swapping start and end.
    ///
    /// A no-op for polylines with fewer than two points.
    pub fn reverse(&mut self) {
        self.0.reverse();
    }
}

/// Configuration for a stitch run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Maximum endpoint gap for two fragments to be considered connected.
    ///
    /// The comparison is strict: a gap of exactly `tolerance` does not
    /// join. Units follow [`metric`](Self::metric) -- coordinate units
    /// for [`DistanceMetric::Planar`], meters for
    /// [`DistanceMetric::GreatCircle`].
    pub tolerance: f64,

    /// Which distance metric to match endpoints with.
    pub metric: DistanceMetric,

    /// Whether to flatten the assembled chain into a single polyline or
    /// keep its fragments as separate ordered records.
    pub mode: OutputMode,
}

impl StitchConfig {
    /// Default endpoint tolerance in coordinate units.
    pub const DEFAULT_TOLERANCE: f64 = 1e-4;
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            metric: DistanceMetric::default(),
            mode: OutputMode::default(),
        }
    }
}

/// Diagnostics for an assembly run that stopped before consuming the
/// whole pool.
///
/// Produced when no candidate endpoint lies within tolerance of either
/// chain end. The recorded distances are the closest candidates seen at
/// the moment the assembler gave up, useful for picking a better
/// tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StallReport {
    /// Number of fragments left unmatched in the pool.
    pub remaining: usize,
    /// Closest candidate distance from the chain tail.
    pub tail_distance: f64,
    /// Closest candidate distance from the chain head.
    pub head_distance: f64,
}

/// Output of the chain assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    /// Fragments in travel order, each oriented tail-to-head.
    pub chain: Vec<Polyline>,
    /// Fragments that could not be connected to either chain end.
    pub leftovers: Vec<Polyline>,
    /// Present when the assembler stopped with fragments remaining.
    pub stall: Option<StallReport>,
}

/// Result of the full [`stitch`](crate::stitch) entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchResult {
    /// The projected output: one combined polyline or the ordered chain
    /// fragments, depending on [`OutputMode`].
    pub polylines: Vec<Polyline>,
    /// Fragments that could not be connected to either chain end.
    pub leftovers: Vec<Polyline>,
    /// Present when assembly stopped with fragments remaining.
    pub stall: Option<StallReport>,
}

/// Errors that can occur during chain assembly.
#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    /// The pool held no usable line fragments.
    #[error("no line fragments available to seed the chain")]
    EmptyInput,

    /// The stitch configuration is invalid.
    #[error("invalid stitch configuration: {0}")]
    InvalidConfig(String),
}
