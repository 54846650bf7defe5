//! Domain types shared by the Münster open-data crates.
//!
//! Holds the [`Garage`] record, the Gauss-Krüger to WGS 84 coordinate
//! converter, and the environment-driven [`ClientConfig`].

pub mod app_config;
pub mod config;
pub mod garage;
pub mod projection;

use thiserror::Error;

pub use app_config::ClientConfig;
pub use config::{load_client_config, load_client_config_from_env};
pub use garage::Garage;
pub use projection::{to_wgs84, LatLon, ProjectionError, SOURCE_EPSG, TARGET_EPSG};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
