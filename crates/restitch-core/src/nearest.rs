//! Nearest-endpoint search over a pool of candidate fragments.
//!
//! [`find_closest`] scans the whole pool and tracks a single running
//! minimum over every (fragment, endpoint) pair, visiting fragments in
//! pool order and each fragment's start before its end. Ties are
//! resolved by that evaluation order: a later candidate replaces the
//! current best only when its distance is strictly smaller. Every query
//! rescans the whole pool; the assembler mutates the pool between
//! queries, so nothing can be indexed ahead of time.

use crate::metric::DistanceMetric;
use crate::types::{Point, Polyline};

/// Which end of a fragment produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The fragment's first point.
    Start,
    /// The fragment's last point.
    End,
}

/// The closest fragment endpoint found by [`find_closest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointMatch {
    /// Index of the matched fragment within the pool it was searched in.
    pub index: usize,
    /// Which end of the fragment is closest to the target.
    pub endpoint: Endpoint,
    /// Distance from the target to that endpoint, in metric units.
    pub distance: f64,
}

/// Find the fragment endpoint closest to `target` across the whole pool.
///
/// Returns `None` when the pool is empty (or contains only empty
/// polylines, which never happens for pools built by the I/O layer).
/// The pool is not mutated; the returned index is only valid against
/// the pool as passed in.
#[must_use]
pub fn find_closest(
    target: Point,
    pool: &[Polyline],
    metric: DistanceMetric,
) -> Option<EndpointMatch> {
    let mut best: Option<EndpointMatch> = None;

    for (index, fragment) in pool.iter().enumerate() {
        let (Some(&first), Some(&last)) = (fragment.first(), fragment.last()) else {
            continue;
        };
        let start_distance = metric.distance(target, first);
        let end_distance = metric.distance(target, last);

        if best.is_none_or(|m| start_distance < m.distance) {
            best = Some(EndpointMatch {
                index,
                endpoint: Endpoint::Start,
                distance: start_distance,
            });
        }
        if best.is_none_or(|m| end_distance < m.distance) {
            best = Some(EndpointMatch {
                index,
                endpoint: Endpoint::End,
                distance: end_distance,
            });
        }
    }

    best
}
