//! Chain assembly: greedy nearest-endpoint stitching.
//!
//! The assembler owns a shrinking pool of unordered fragments and grows
//! a single chain from it. Each round it asks [`find_closest`] for the
//! best candidate off the chain tail, then off the chain head, and
//! extends whichever end produced a match within tolerance. Matched
//! fragments are reversed as needed so the chain always reads
//! tail-to-head. When neither end has a candidate within tolerance the
//! run stops and whatever is left in the pool becomes leftovers; no
//! second chain is started.
//!
//! Cost is O(n²) in the fragment count: at most one fragment leaves the
//! pool per round, and every round rescans the remaining pool.

use tracing::{debug, info, warn};

use crate::metric::DistanceMetric;
use crate::nearest::{Endpoint, find_closest};
use crate::types::{Assembly, Polyline, StallReport, StitchError};

/// Assemble an unordered pool of fragments into one ordered chain.
///
/// The chain is seeded with the pool's last fragment; empty polylines
/// are dropped before seeding. A candidate joins only when its matched
/// endpoint is strictly closer than `tolerance` (in the units of
/// `metric`). Fragments whose natural orientation runs against the
/// chain are reversed on insertion.
///
/// A run that stops early still succeeds: the returned [`Assembly`]
/// carries the partial chain, the unmatched leftovers, and a
/// [`StallReport`] with the closest distances seen from both chain
/// ends.
///
/// # Errors
///
/// Returns [`StitchError::EmptyInput`] if the pool has no non-empty
/// fragments, and [`StitchError::InvalidConfig`] if `tolerance` is
/// negative or not finite.
pub fn assemble(
    pool: Vec<Polyline>,
    tolerance: f64,
    metric: DistanceMetric,
) -> Result<Assembly, StitchError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(StitchError::InvalidConfig(format!(
            "tolerance must be finite and non-negative, got {tolerance}"
        )));
    }

    let mut pool: Vec<Polyline> = pool.into_iter().filter(|f| !f.is_empty()).collect();
    let Some(seed) = pool.pop() else {
        return Err(StitchError::EmptyInput);
    };

    let mut chain = vec![seed];
    let mut stall = None;

    while !pool.is_empty() {
        // Extend off the tail first.
        let Some(&tail_point) = chain.last().and_then(Polyline::last) else {
            break;
        };
        let tail_match = find_closest(tail_point, &pool, metric);
        if let Some(m) = tail_match
            && m.distance < tolerance
        {
            debug!(
                distance = m.distance,
                endpoint = ?m.endpoint,
                "found fragment adjacent to chain tail"
            );
            let mut fragment = pool.remove(m.index);
            if m.endpoint == Endpoint::End {
                debug!("flipping fragment");
                fragment.reverse();
            }
            chain.push(fragment);
            continue;
        }

        // No tail candidate within tolerance; try the head.
        let Some(&head_point) = chain.first().and_then(Polyline::first) else {
            break;
        };
        let head_match = find_closest(head_point, &pool, metric);
        if let Some(m) = head_match
            && m.distance < tolerance
        {
            debug!(
                distance = m.distance,
                endpoint = ?m.endpoint,
                "found fragment adjacent to chain head"
            );
            let mut fragment = pool.remove(m.index);
            if m.endpoint == Endpoint::Start {
                debug!("flipping fragment");
                fragment.reverse();
            }
            chain.insert(0, fragment);
            continue;
        }

        let tail_distance = tail_match.map_or(f64::INFINITY, |m| m.distance);
        let head_distance = head_match.map_or(f64::INFINITY, |m| m.distance);
        warn!(
            remaining = pool.len(),
            tail_distance,
            head_distance,
            "no fragment within tolerance of either chain end, giving up"
        );
        stall = Some(StallReport {
            remaining: pool.len(),
            tail_distance,
            head_distance,
        });
        break;
    }

    info!(
        in_order = chain.len(),
        remaining = pool.len(),
        "assembly finished"
    );

    Ok(Assembly {
        chain,
        leftovers: pool,
        stall,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn line(coords: &[(f64, f64)]) -> Polyline {
        Polyline::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    /// Concatenate a chain's coordinates, shared junction points included.
    fn concat(chain: &[Polyline]) -> Vec<Point> {
        chain.iter().flat_map(|f| f.points().iter().copied()).collect()
    }

    #[test]
    fn empty_pool_is_an_error() {
        let result = assemble(vec![], 0.1, DistanceMetric::Planar);
        assert!(matches!(result, Err(StitchError::EmptyInput)));
    }

    #[test]
    fn pool_of_empty_polylines_is_an_error() {
        let result = assemble(vec![Polyline::new(vec![])], 0.1, DistanceMetric::Planar);
        assert!(matches!(result, Err(StitchError::EmptyInput)));
    }

    #[test]
    fn negative_tolerance_is_invalid() {
        let pool = vec![line(&[(0.0, 0.0), (1.0, 0.0)])];
        let result = assemble(pool, -1.0, DistanceMetric::Planar);
        assert!(matches!(result, Err(StitchError::InvalidConfig(_))));
    }

    #[test]
    fn nan_tolerance_is_invalid() {
        let pool = vec![line(&[(0.0, 0.0), (1.0, 0.0)])];
        let result = assemble(pool, f64::NAN, DistanceMetric::Planar);
        assert!(matches!(result, Err(StitchError::InvalidConfig(_))));
    }

    #[test]
    fn single_fragment_identity() {
        let fragment = line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let result = assemble(vec![fragment.clone()], 0.0, DistanceMetric::Planar).unwrap();
        assert_eq!(result.chain, vec![fragment]);
        assert!(result.leftovers.is_empty());
        assert!(result.stall.is_none());
    }

    #[test]
    fn perfect_chain_reconstruction() {
        // Base polyline P0..P6 cut into three contiguous pieces sharing
        // their cut vertices, the middle piece reversed, pool shuffled.
        let base: Vec<Point> = (0..7).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let a = Polyline::new(base[0..3].to_vec());
        let mut b = Polyline::new(base[2..5].to_vec());
        let c = Polyline::new(base[4..7].to_vec());
        b.reverse();

        // Seed is the pool's last entry, so assembly starts from `a`.
        let result = assemble(vec![b, c, a], 1e-9, DistanceMetric::Planar).unwrap();
        assert!(result.leftovers.is_empty());
        assert!(result.stall.is_none());
        assert_eq!(result.chain.len(), 3);

        let expected: Vec<Point> = vec![
            base[0], base[1], base[2], base[2], base[3], base[4], base[4], base[5], base[6],
        ];
        let mut actual = concat(&result.chain);
        if actual.first() != expected.first() {
            actual.reverse();
        }
        assert_eq!(actual, expected);
    }

    #[test]
    fn head_extension_when_seed_is_interior() {
        let base: Vec<Point> = (0..7).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let a = Polyline::new(base[0..3].to_vec());
        let b = Polyline::new(base[2..5].to_vec());
        let c = Polyline::new(base[4..7].to_vec());

        // Seed is `b`, the middle piece: `c` joins at the tail, then `a`
        // can only join at the head.
        let result = assemble(
            vec![a.clone(), c.clone(), b.clone()],
            1e-9,
            DistanceMetric::Planar,
        )
        .unwrap();
        assert!(result.leftovers.is_empty());
        assert_eq!(result.chain, vec![a, b, c]);
    }

    #[test]
    fn orientation_is_connection_driven() {
        // `a` is inserted reversed; assembly must re-reverse it so it
        // connects to the chain head.
        let base: Vec<Point> = (0..5).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let mut a = Polyline::new(base[0..3].to_vec());
        let b = Polyline::new(base[2..5].to_vec());
        a.reverse();

        let result = assemble(vec![a, b], 0.5, DistanceMetric::Planar).unwrap();
        assert!(result.leftovers.is_empty());
        assert_eq!(result.chain[0].points(), &base[0..3]);
        assert_eq!(result.chain[1].points(), &base[2..5]);
    }

    #[test]
    fn gap_equal_to_tolerance_does_not_join() {
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.5, 0.0), (2.5, 0.0)]);

        let result = assemble(vec![a, b], 0.5, DistanceMetric::Planar).unwrap();
        assert_eq!(result.chain.len(), 1);
        assert_eq!(result.leftovers.len(), 1);
        let stall = result.stall.unwrap();
        assert_eq!(stall.remaining, 1);
        assert!((stall.tail_distance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn gap_below_tolerance_joins() {
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.5, 0.0), (2.5, 0.0)]);

        let result = assemble(vec![a, b], 0.5 + 1e-9, DistanceMetric::Planar).unwrap();
        assert_eq!(result.chain.len(), 2);
        assert!(result.leftovers.is_empty());
        assert!(result.stall.is_none());
    }

    #[test]
    fn isolated_fragment_becomes_leftover() {
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (2.0, 0.0)]);
        let far = line(&[(100.0, 100.0), (101.0, 100.0)]);

        // Seed is `b`; `a` joins, `far` stays out.
        let result = assemble(vec![far.clone(), a, b], 0.1, DistanceMetric::Planar).unwrap();
        assert_eq!(result.chain.len(), 2);
        assert_eq!(result.leftovers, vec![far]);
        let stall = result.stall.unwrap();
        assert_eq!(stall.remaining, 1);
        assert!(stall.tail_distance > 0.1);
        assert!(stall.head_distance > 0.1);
    }

    #[test]
    fn stall_reports_both_closest_distances() {
        // Chain is the seed alone; the one candidate sits 3 units off
        // the tail and 4 off the head.
        let seed = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let candidate = line(&[(4.0, 0.0), (10.0, 0.0)]);

        let result = assemble(vec![candidate, seed], 1.0, DistanceMetric::Planar).unwrap();
        let stall = result.stall.unwrap();
        assert!((stall.tail_distance - 3.0).abs() < 1e-12);
        assert!((stall.head_distance - 4.0).abs() < 1e-12);
    }

    #[test]
    fn chain_adjacency_invariant_holds() {
        let base: Vec<Point> = (0..9).map(|i| Point::new(f64::from(i), f64::from(i % 2))).collect();
        let pieces = vec![
            Polyline::new(base[4..7].to_vec()),
            Polyline::new(base[0..3].to_vec()),
            Polyline::new(base[6..9].to_vec()),
            Polyline::new(base[2..5].to_vec()),
        ];

        let result = assemble(pieces, 1e-9, DistanceMetric::Planar).unwrap();
        assert!(result.leftovers.is_empty());
        for pair in result.chain.windows(2) {
            let end = pair[0].last().unwrap();
            let start = pair[1].first().unwrap();
            assert_eq!(end, start, "adjacent fragments must connect");
        }
    }

    #[test]
    fn metric_modes_are_not_interchangeable() {
        // Fragments 1e-5 degrees apart: ~1.1 m on the ground. A planar
        // tolerance of 1e-4 joins them; the same number read as meters
        // under great-circle does not.
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.00001, 0.0), (2.0, 0.0)]);

        let planar = assemble(vec![a.clone(), b.clone()], 1e-4, DistanceMetric::Planar).unwrap();
        assert!(planar.leftovers.is_empty());

        let meters_too_tight =
            assemble(vec![a.clone(), b.clone()], 1e-4, DistanceMetric::GreatCircle).unwrap();
        assert_eq!(meters_too_tight.leftovers.len(), 1);

        let meters_retuned = assemble(vec![a, b], 2.0, DistanceMetric::GreatCircle).unwrap();
        assert!(meters_retuned.leftovers.is_empty());
    }

    #[test]
    fn zero_tolerance_joins_nothing() {
        // Even exactly coincident endpoints are at distance 0, which is
        // not strictly below a zero tolerance.
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (2.0, 0.0)]);

        let result = assemble(vec![a, b], 0.0, DistanceMetric::Planar).unwrap();
        assert_eq!(result.chain.len(), 1);
        assert_eq!(result.leftovers.len(), 1);
    }
}
