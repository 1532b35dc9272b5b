//! restitch-io: GeoJSON source and sink collaborators.
//!
//! The assembly algorithm in `restitch-core` is sans-IO; this crate
//! owns the boundary with persistent storage. The source side reads a
//! GeoJSON FeatureCollection into a pool of polylines, the sink side
//! writes assembled polylines back out as LineString features with no
//! attributes. The legacy `crs` foreign member, when present on the
//! source collection, is propagated to the output unchanged.

pub mod read;
pub mod write;

use std::path::PathBuf;

pub use read::{LineCollection, parse_collection, read_lines};
pub use write::{serialize_collection, write_lines};

/// Errors that can occur at the GeoJSON boundary.
#[derive(Debug, thiserror::Error)]
pub enum GeoJsonError {
    /// Failed to read the source file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the destination file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The source text is not valid GeoJSON.
    #[error("failed to parse GeoJSON: {0}")]
    Parse(#[from] geojson::Error),

    /// The source document's top level is not a FeatureCollection.
    #[error("expected a FeatureCollection at the top level")]
    NotFeatureCollection,

    /// A feature carries a geometry type the pool cannot hold.
    #[error("feature {index}: unsupported geometry type {kind}")]
    UnsupportedGeometry {
        /// Zero-based index of the offending feature.
        index: usize,
        /// GeoJSON type name of the offending geometry.
        kind: &'static str,
    },

    /// A coordinate position held fewer than two values.
    #[error("feature {index}: coordinate position with fewer than 2 values")]
    InvalidPosition {
        /// Zero-based index of the offending feature.
        index: usize,
    },
}
