//! GeoJSON source collaborator: FeatureCollection -> fragment pool.

use std::fs;
use std::path::Path;

use geojson::{GeoJson, Value};
use serde_json::Value as JsonValue;
use tracing::debug;

use restitch_core::{Point, Polyline};

use crate::GeoJsonError;

/// A pool of line fragments read from one source collection, plus the
/// coordinate-reference-system member to propagate to the output.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCollection {
    /// Fragments in source feature order.
    pub polylines: Vec<Polyline>,
    /// The collection's `crs` foreign member, verbatim, if present.
    pub crs: Option<JsonValue>,
}

/// Read a fragment pool from a GeoJSON file.
///
/// # Errors
///
/// Returns [`GeoJsonError::Read`] when the file cannot be read, and any
/// error [`parse_collection`] produces for its contents.
pub fn read_lines(path: &Path) -> Result<LineCollection, GeoJsonError> {
    let text = fs::read_to_string(path).map_err(|source| GeoJsonError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_collection(&text)
}

/// Parse a fragment pool from GeoJSON text.
///
/// The top level must be a FeatureCollection. Features with a null
/// geometry are skipped, as are empty LineStrings. A MultiLineString
/// contributes one pool fragment per non-empty member line. Any other
/// geometry type is an error.
///
/// # Errors
///
/// Returns [`GeoJsonError::Parse`] for malformed GeoJSON,
/// [`GeoJsonError::NotFeatureCollection`] for other top-level types,
/// [`GeoJsonError::UnsupportedGeometry`] for non-line geometries, and
/// [`GeoJsonError::InvalidPosition`] for positions with fewer than two
/// values.
pub fn parse_collection(text: &str) -> Result<LineCollection, GeoJsonError> {
    let geojson: GeoJson = text.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeoJsonError::NotFeatureCollection);
    };

    let crs = collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("crs"))
        .cloned();

    let mut polylines = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            debug!(index, "skipping feature with null geometry");
            continue;
        };

        match &geometry.value {
            Value::LineString(positions) => {
                if let Some(polyline) = positions_to_polyline(positions, index)? {
                    polylines.push(polyline);
                }
            }
            Value::MultiLineString(lines) => {
                for positions in lines {
                    if let Some(polyline) = positions_to_polyline(positions, index)? {
                        polylines.push(polyline);
                    }
                }
            }
            other => {
                return Err(GeoJsonError::UnsupportedGeometry {
                    index,
                    kind: geometry_kind(other),
                });
            }
        }
    }

    Ok(LineCollection { polylines, crs })
}

/// Convert a GeoJSON coordinate sequence into a polyline.
///
/// Extra per-position values (elevation and beyond) are dropped. An
/// empty sequence yields `None` so the feature is skipped rather than
/// polluting the pool with an empty fragment.
fn positions_to_polyline(
    positions: &[Vec<f64>],
    index: usize,
) -> Result<Option<Polyline>, GeoJsonError> {
    if positions.is_empty() {
        debug!(index, "skipping feature with empty geometry");
        return Ok(None);
    }

    let mut points = Vec::with_capacity(positions.len());
    for position in positions {
        match position.as_slice() {
            [x, y, ..] => points.push(Point::new(*x, *y)),
            _ => return Err(GeoJsonError::InvalidPosition { index }),
        }
    }
    Ok(Some(Polyline::new(points)))
}

/// GeoJSON type name for an unsupported geometry value.
const fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}
