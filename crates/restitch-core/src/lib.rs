//! restitch-core: greedy endpoint-matching chain assembly (sans-IO).
//!
//! Reconstructs a travel-order sequence from an unordered pool of line
//! fragments by repeatedly matching the closest fragment endpoint to
//! the growing chain's tail or head:
//! nearest-endpoint search -> orientation decision -> chain extension ->
//! optional flattening.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! polylines and returns structured data. All file format and
//! filesystem interaction lives in `restitch-io`.

pub mod assemble;
pub mod metric;
pub mod nearest;
pub mod project;
pub mod types;

pub use assemble::assemble;
pub use metric::DistanceMetric;
pub use nearest::{Endpoint, EndpointMatch, find_closest};
pub use project::{OutputMode, project};
pub use types::{
    Assembly, Point, Polyline, StallReport, StitchConfig, StitchError, StitchResult,
};

/// Run assembly and projection in one step.
///
/// Takes an unordered pool of fragments and a configuration, assembles
/// the chain under the configured tolerance and metric, then projects
/// it per the configured output mode. The returned [`StitchResult`]
/// keeps the leftover fragments and any stall diagnostics alongside the
/// projected polylines so callers can decide whether a partial result
/// is acceptable.
///
/// # Errors
///
/// Returns [`StitchError::EmptyInput`] if `pool` contains no non-empty
/// fragments, and [`StitchError::InvalidConfig`] for a negative or
/// non-finite tolerance.
pub fn stitch(pool: Vec<Polyline>, config: &StitchConfig) -> Result<StitchResult, StitchError> {
    let Assembly {
        chain,
        leftovers,
        stall,
    } = assemble(pool, config.tolerance, config.metric)?;

    Ok(StitchResult {
        polylines: project(config.mode, chain),
        leftovers,
        stall,
    })
}
