//! Output projection: flatten an assembled chain or keep it as ordered
//! records.
//!
//! Concatenation keeps every point of every fragment, so a junction
//! where two fragments meet at the exact same coordinate appears twice
//! in the combined output. Downstream tooling that cares can dedup;
//! this stage never drops data.

use serde::{Deserialize, Serialize};

use crate::types::Polyline;

/// Selects the shape of the projected output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    /// Concatenate the whole chain into one polyline.
    #[default]
    Combine,

    /// Emit each chain fragment as its own record, in chain order, with
    /// the orientation decided during assembly.
    Sequence,
}

/// Project an assembled chain into its output form.
#[must_use]
pub fn project(mode: OutputMode, chain: Vec<Polyline>) -> Vec<Polyline> {
    match mode {
        OutputMode::Combine => vec![combine(&chain)],
        OutputMode::Sequence => chain,
    }
}

/// Concatenate the coordinate sequences of all chain fragments in order.
fn combine(chain: &[Polyline]) -> Polyline {
    let total_points: usize = chain.iter().map(Polyline::len).sum();
    let mut points = Vec::with_capacity(total_points);

    for fragment in chain {
        points.extend_from_slice(fragment.points());
    }

    Polyline::new(points)
}
