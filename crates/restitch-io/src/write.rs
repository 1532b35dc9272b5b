//! GeoJSON sink collaborator: assembled polylines -> FeatureCollection.

use std::fs;
use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::Value as JsonValue;
use tracing::debug;

use restitch_core::Polyline;

use crate::GeoJsonError;

/// Write polylines to a GeoJSON file as LineString features.
///
/// One feature per polyline, in order, each with empty properties.
/// `crs`, when given, is attached to the collection as a foreign member
/// exactly as read from the source.
///
/// # Errors
///
/// Returns [`GeoJsonError::Write`] when the file cannot be written.
pub fn write_lines(
    path: &Path,
    polylines: &[Polyline],
    crs: Option<&JsonValue>,
) -> Result<(), GeoJsonError> {
    let text = serialize_collection(polylines, crs);
    debug!(features = polylines.len(), path = %path.display(), "writing collection");
    fs::write(path, text).map_err(|source| GeoJsonError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize polylines into GeoJSON FeatureCollection text.
#[must_use]
pub fn serialize_collection(polylines: &[Polyline], crs: Option<&JsonValue>) -> String {
    let features = polylines
        .iter()
        .map(|polyline| Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(
                polyline.points().iter().map(|p| vec![p.x, p.y]).collect(),
            ))),
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        })
        .collect();

    let foreign_members = crs.map(|value| {
        let mut members = JsonObject::new();
        members.insert("crs".to_string(), value.clone());
        members
    });

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members,
    };

    GeoJson::from(collection).to_string()
}
