//! Response types for the city's parking-garage feed.
//!
//! ## Observed shape
//!
//! `GET https://stadt-muenster.de/index.php?id=10910` answers with
//! `Content-Type: text/html` but the body is a GeoJSON-like feature
//! collection:
//!
//! ```json
//! { "features": [ {
//!     "properties": { "NAME": "PH Theater", "status": "frei", "type": "Parkhaus",
//!                     "parkingFree": 293, "parkingTotal": 530, "URL": "https://..." },
//!     "geometry": { "coordinates": [3405412.0, 5759126.0] } } ] }
//! ```
//!
//! Coordinates are Gauss-Krüger zone 3 `[easting, northing]`.
//! Counts have been seen as JSON numbers; numeric strings are accepted too.

use serde::Deserialize;

/// Top-level feature collection. Features stay raw so that a malformed one
/// can be reported with its index.
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<serde_json::Value>,
}

/// A single garage feature.
#[derive(Debug, Deserialize)]
pub struct GarageFeature {
    pub properties: GarageProperties,
    pub geometry: Geometry,
}

/// Descriptive attributes of a garage. Every key may be absent or `null`.
#[derive(Debug, Default, Deserialize)]
pub struct GarageProperties {
    #[serde(rename = "NAME", default)]
    pub name: Option<String>,

    /// Operational state, e.g. `"frei"`, `"besetzt"`, `"geschlossen"`.
    #[serde(default)]
    pub status: Option<String>,

    /// Structure type, e.g. `"Parkhaus"` or `"Tiefgarage"`.
    #[serde(rename = "type", default)]
    pub parking_type: Option<String>,

    #[serde(rename = "parkingFree", default)]
    pub parking_free: Option<serde_json::Value>,

    #[serde(rename = "parkingTotal", default)]
    pub parking_total: Option<serde_json::Value>,

    #[serde(rename = "URL", default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[x, y]` = `[easting, northing]`; extra elements (height) are ignored.
    pub coordinates: Vec<f64>,
}
