//! Conversion from DHDN / 3-degree Gauss-Krüger zone 3 (EPSG:31467) to
//! WGS 84 geographic coordinates (EPSG:4326).
//!
//! The city publishes garage positions as Gauss-Krüger Easting/Northing on the
//! Bessel 1841 ellipsoid. Conversion runs in three steps:
//!
//! 1. inverse Transverse Mercator on Bessel 1841 (Krüger n-series),
//! 2. DHDN → WGS 84 datum shift via a 7-parameter Helmert transform on
//!    geocentric coordinates,
//! 3. geocentric → geodetic on the WGS 84 ellipsoid.
//!
//! Accuracy is limited by the Helmert parameters (a few metres), which is far
//! below what a garage marker on a map needs.

use serde::Serialize;
use thiserror::Error;

/// EPSG code of the source system: DHDN / 3-degree Gauss-Krüger zone 3.
pub const SOURCE_EPSG: u32 = 31467;

/// EPSG code of the target system: WGS 84 geographic.
pub const TARGET_EPSG: u32 = 4326;

const BESSEL_A: f64 = 6_377_397.155;
const BESSEL_INV_F: f64 = 299.152_812_8;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_INV_F: f64 = 298.257_223_563;

const CENTRAL_MERIDIAN_DEG: f64 = 9.0;
const FALSE_EASTING: f64 = 3_500_000.0;
const SCALE_FACTOR: f64 = 1.0;

// DHDN -> WGS 84, position vector convention.
const HELMERT_TX: f64 = 598.1;
const HELMERT_TY: f64 = 73.7;
const HELMERT_TZ: f64 = 418.2;
const HELMERT_RX_ARCSEC: f64 = 0.202;
const HELMERT_RY_ARCSEC: f64 = 0.045;
const HELMERT_RZ_ARCSEC: f64 = -2.455;
const HELMERT_SCALE_PPM: f64 = 6.7;

/// A WGS 84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("non-finite {axis} coordinate: {value}")]
    NonFinite { axis: &'static str, value: f64 },
}

/// Converts a Gauss-Krüger zone 3 position to WGS 84.
///
/// Arguments follow the axis order of EPSG:31467: northing first, easting
/// second. Easting carries the zone prefix (`3 4xx xxx` around Münster).
///
/// # Errors
///
/// Returns [`ProjectionError::NonFinite`] if either input is NaN or infinite.
pub fn to_wgs84(northing: f64, easting: f64) -> Result<LatLon, ProjectionError> {
    if !northing.is_finite() {
        return Err(ProjectionError::NonFinite {
            axis: "northing",
            value: northing,
        });
    }
    if !easting.is_finite() {
        return Err(ProjectionError::NonFinite {
            axis: "easting",
            value: easting,
        });
    }

    let (phi, lambda) = inverse_transverse_mercator(northing, easting);
    let bessel = Ellipsoid::new(BESSEL_A, BESSEL_INV_F);
    let wgs84 = Ellipsoid::new(WGS84_A, WGS84_INV_F);

    let dhdn = bessel.to_geocentric(phi, lambda);
    let shifted = helmert_dhdn_to_wgs84(dhdn);
    let (lat, lon) = wgs84.to_geodetic(shifted);

    Ok(LatLon {
        latitude: lat.to_degrees(),
        longitude: lon.to_degrees(),
    })
}

#[derive(Debug, Clone, Copy)]
struct Ellipsoid {
    a: f64,
    e2: f64,
}

impl Ellipsoid {
    fn new(a: f64, inverse_flattening: f64) -> Self {
        let f = 1.0 / inverse_flattening;
        Self {
            a,
            e2: f * (2.0 - f),
        }
    }

    fn prime_vertical_radius(self, phi: f64) -> f64 {
        self.a / (1.0 - self.e2 * phi.sin().powi(2)).sqrt()
    }

    /// Geodetic (radians, ellipsoidal height 0) to geocentric XYZ in metres.
    fn to_geocentric(self, phi: f64, lambda: f64) -> [f64; 3] {
        let n = self.prime_vertical_radius(phi);
        [
            n * phi.cos() * lambda.cos(),
            n * phi.cos() * lambda.sin(),
            n * (1.0 - self.e2) * phi.sin(),
        ]
    }

    /// Geocentric XYZ to geodetic latitude/longitude in radians.
    fn to_geodetic(self, [x, y, z]: [f64; 3]) -> (f64, f64) {
        let p = x.hypot(y);
        let lambda = y.atan2(x);
        let mut phi = z.atan2(p * (1.0 - self.e2));
        for _ in 0..10 {
            let n = self.prime_vertical_radius(phi);
            let h = p / phi.cos() - n;
            let next = z.atan2(p * (1.0 - self.e2 * n / (n + h)));
            if (next - phi).abs() < 1e-14 {
                phi = next;
                break;
            }
            phi = next;
        }
        (phi, lambda)
    }
}

/// Inverse Transverse Mercator on Bessel 1841, returning (phi, lambda) in radians.
pub(crate) fn inverse_transverse_mercator(northing: f64, easting: f64) -> (f64, f64) {
    let f = 1.0 / BESSEL_INV_F;
    let n = f / (2.0 - f);
    let n2 = n * n;
    let n3 = n2 * n;

    let rectifying_radius = BESSEL_A / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);
    let beta = [
        n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0,
        n2 / 48.0 + n3 / 15.0,
        17.0 * n3 / 480.0,
    ];
    let delta = [
        2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3,
        7.0 * n2 / 3.0 - 8.0 * n3 / 5.0,
        56.0 * n3 / 15.0,
    ];

    let xi = northing / (SCALE_FACTOR * rectifying_radius);
    let eta = (easting - FALSE_EASTING) / (SCALE_FACTOR * rectifying_radius);

    let mut xi_prime = xi;
    let mut eta_prime = eta;
    for (j, b) in (1..=3_u8).map(f64::from).zip(beta) {
        xi_prime -= b * (2.0 * j * xi).sin() * (2.0 * j * eta).cosh();
        eta_prime -= b * (2.0 * j * xi).cos() * (2.0 * j * eta).sinh();
    }

    let chi = (xi_prime.sin() / eta_prime.cosh()).asin();
    let mut phi = chi;
    for (j, d) in (1..=3_u8).map(f64::from).zip(delta) {
        phi += d * (2.0 * j * chi).sin();
    }
    let lambda = CENTRAL_MERIDIAN_DEG.to_radians() + eta_prime.sinh().atan2(xi_prime.cos());

    (phi, lambda)
}

fn helmert_dhdn_to_wgs84([x, y, z]: [f64; 3]) -> [f64; 3] {
    let arcsec = (1.0_f64 / 3600.0).to_radians();
    let rx = HELMERT_RX_ARCSEC * arcsec;
    let ry = HELMERT_RY_ARCSEC * arcsec;
    let rz = HELMERT_RZ_ARCSEC * arcsec;
    let m = 1.0 + HELMERT_SCALE_PPM * 1e-6;

    [
        HELMERT_TX + m * (x - rz * y + ry * z),
        HELMERT_TY + m * (rz * x + y - rx * z),
        HELMERT_TZ + m * (-ry * x + rx * y + z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE_DEG: f64 = 1e-6;

    #[test]
    fn converts_muenster_city_centre() {
        let pos = to_wgs84(5_759_000.0, 3_405_000.0).unwrap();
        assert!((pos.latitude - 51.956_800_37).abs() < TOLERANCE_DEG, "{pos:?}");
        assert!((pos.longitude - 7.616_974_72).abs() < TOLERANCE_DEG, "{pos:?}");
    }

    #[test]
    fn converts_second_reference_point() {
        let pos = to_wgs84(5_760_000.0, 3_406_000.0).unwrap();
        assert!((pos.latitude - 51.965_955_09).abs() < TOLERANCE_DEG, "{pos:?}");
        assert!((pos.longitude - 7.631_243_70).abs() < TOLERANCE_DEG, "{pos:?}");
    }

    #[test]
    fn central_meridian_maps_to_nine_degrees_before_datum_shift() {
        let (phi, lambda) = inverse_transverse_mercator(5_000_000.0, FALSE_EASTING);
        assert!((lambda.to_degrees() - 9.0).abs() < 1e-12);
        assert!((phi.to_degrees() - 45.140_034_377).abs() < TOLERANCE_DEG);
    }

    #[test]
    fn conversion_is_deterministic() {
        let a = to_wgs84(5_757_500.0, 3_404_200.0).unwrap();
        let b = to_wgs84(5_757_500.0, 3_404_200.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn realistic_inputs_stay_inside_the_region() {
        for (northing, easting) in [
            (5_752_000.0, 3_398_000.0),
            (5_759_300.0, 3_405_400.0),
            (5_762_000.0, 3_410_000.0),
        ] {
            let pos = to_wgs84(northing, easting).unwrap();
            assert!((51.0..52.0).contains(&pos.latitude), "{pos:?}");
            assert!((7.0..8.0).contains(&pos.longitude), "{pos:?}");
        }
    }

    #[test]
    fn rejects_non_finite_input() {
        assert!(matches!(
            to_wgs84(f64::NAN, 3_405_000.0),
            Err(ProjectionError::NonFinite { axis: "northing", .. })
        ));
        assert!(matches!(
            to_wgs84(5_759_000.0, f64::INFINITY),
            Err(ProjectionError::NonFinite { axis: "easting", .. })
        ));
    }
}
