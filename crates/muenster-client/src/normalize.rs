//! Turns raw garage features into [`Garage`] records.

use muenster_core::{projection, Garage};

use crate::error::MuensterError;
use crate::types::{FeatureCollection, GarageFeature};

/// Maps every feature of a decoded feature collection, preserving order.
///
/// # Errors
///
/// - [`MuensterError::Deserialize`] if the body has no `features` array.
/// - [`MuensterError::InvalidFeature`] for the first feature that cannot be
///   converted; the whole batch fails so the output never drops entries.
pub fn garages_from_collection(body: serde_json::Value) -> Result<Vec<Garage>, MuensterError> {
    let collection: FeatureCollection =
        serde_json::from_value(body).map_err(|source| MuensterError::Deserialize {
            context: "garage feature collection".to_owned(),
            source,
        })?;

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| garage_from_feature(index, feature))
        .collect()
}

/// Builds one [`Garage`] from a raw feature.
///
/// Text attributes that are absent or `null` become empty strings. Counts and
/// coordinates are required.
///
/// # Errors
///
/// Returns [`MuensterError::InvalidFeature`] if the feature shape is wrong,
/// a count is missing or not a non-negative integer, or the coordinates
/// cannot be converted.
pub fn garage_from_feature(
    index: usize,
    feature: serde_json::Value,
) -> Result<Garage, MuensterError> {
    let invalid = |reason: String| MuensterError::InvalidFeature { index, reason };

    let GarageFeature {
        properties,
        geometry,
    } = serde_json::from_value(feature).map_err(|e| invalid(e.to_string()))?;

    let free_space = parse_count(properties.parking_free.as_ref())
        .ok_or_else(|| invalid(format!("bad parkingFree: {:?}", properties.parking_free)))?;
    let total_capacity = parse_count(properties.parking_total.as_ref())
        .ok_or_else(|| invalid(format!("bad parkingTotal: {:?}", properties.parking_total)))?;

    let &[x, y, ..] = geometry.coordinates.as_slice() else {
        return Err(invalid(format!(
            "expected at least two coordinates, got {}",
            geometry.coordinates.len()
        )));
    };
    // The second element (northing) is the first converter argument.
    let position = projection::to_wgs84(y, x).map_err(|e| invalid(e.to_string()))?;

    Ok(Garage::new(
        properties.name.unwrap_or_default(),
        properties.status.unwrap_or_default(),
        properties.parking_type.unwrap_or_default(),
        properties.url.unwrap_or_default(),
        free_space,
        total_capacity,
        position,
    ))
}

/// Accepts a JSON integer, an integral float, or a numeric string.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn parse_count(value: Option<&serde_json::Value>) -> Option<u32> {
    match value? {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
