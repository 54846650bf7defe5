//! Async client for the open data published by the city of Münster.
//!
//! Two API variants share one request pipeline:
//!
//! - [`OdpMuenster`] talks to the Open Data Platform and expects
//!   `application/json` answers.
//! - [`StadtMuenster`] talks to the city website, whose parking-garage feed
//!   is labelled `text/html` but carries JSON. [`StadtMuenster::garages`]
//!   returns [`Garage`] records with WGS 84 coordinates.
//!
//! ```no_run
//! # async fn run() -> Result<(), muenster_client::MuensterError> {
//! let client = muenster_client::StadtMuenster::new(10.0, None)?;
//! let garages = client.garages().await;
//! client.close();
//! for garage in garages? {
//!     println!("{garage}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod normalize;
pub mod odp;
pub mod stadt;
pub mod types;

mod executor;
mod session;

pub use error::{ErrorKind, MuensterError};
pub use muenster_core::{Garage, LatLon};
pub use odp::OdpMuenster;
pub use reqwest::Method;
pub use stadt::StadtMuenster;
