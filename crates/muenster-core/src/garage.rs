use std::fmt;

use serde::Serialize;

use crate::projection::LatLon;

/// One parking garage as published by the city.
///
/// Immutable once built: every field is private and `availability_pct` is
/// derived from the two counts inside [`Garage::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Garage {
    name: String,
    status: String,
    parking_type: String,
    free_space: u32,
    total_capacity: u32,
    availability_pct: f64,
    url: String,
    longitude: f64,
    latitude: f64,
}

impl Garage {
    /// Builds a garage record, deriving the availability percentage.
    ///
    /// A garage reporting a total capacity of zero gets an availability of
    /// `0.0` instead of a division by zero.
    #[must_use]
    pub fn new(
        name: String,
        status: String,
        parking_type: String,
        url: String,
        free_space: u32,
        total_capacity: u32,
        position: LatLon,
    ) -> Self {
        Self {
            name,
            status,
            parking_type,
            free_space,
            total_capacity,
            availability_pct: availability_pct(free_space, total_capacity),
            url,
            longitude: position.longitude,
            latitude: position.latitude,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operational state exactly as reported upstream (e.g. `"frei"`).
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn parking_type(&self) -> &str {
        &self.parking_type
    }

    #[must_use]
    pub fn free_space(&self) -> u32 {
        self.free_space
    }

    #[must_use]
    pub fn total_capacity(&self) -> u32 {
        self.total_capacity
    }

    /// Free spaces as a percentage of capacity, rounded to one decimal.
    #[must_use]
    pub fn availability_pct(&self) -> f64 {
        self.availability_pct
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn position(&self) -> LatLon {
        LatLon {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl fmt::Display for Garage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}/{} free ({:.1}%) at {:.6}, {:.6}",
            self.name,
            self.status,
            self.free_space,
            self.total_capacity,
            self.availability_pct,
            self.latitude,
            self.longitude
        )
    }
}

/// `round(free / total * 100, 1)` with ties to even; `0.0` when `total` is zero.
fn availability_pct(free_space: u32, total_capacity: u32) -> f64 {
    if total_capacity == 0 {
        return 0.0;
    }
    let pct = f64::from(free_space) / f64::from(total_capacity) * 100.0;
    (pct * 10.0).round_ties_even() / 10.0
}
