//! Client for the city website (`stadt-muenster.de`), which hosts the live
//! parking-garage feed.

use std::time::Duration;

use muenster_core::app_config::DEFAULT_STADT_BASE_URL;
use muenster_core::{ClientConfig, Garage};
use reqwest::{Client, Method, Url};

use crate::error::MuensterError;
use crate::executor::{ApiVariant, RequestExecutor};
use crate::normalize::garages_from_collection;
use crate::session::Session;

/// Page that serves the parking-garage feature collection.
const GARAGES_PATH: &str = "index.php";
/// Dataset identifier of the parking-garage feed.
const GARAGES_DATASET_ID: &str = "10910";

// The site labels the feed `text/html` even though the body is JSON.
const STADT_VARIANT: ApiVariant = ApiVariant {
    name: "Stadt Münster website",
    accept: "text/html",
    expected_content_type: "text/html",
    user_agent: concat!("muenster-client/", env!("CARGO_PKG_VERSION"), " (stadt)"),
};

/// Client for the Stadt Münster website.
///
/// Session ownership works as for [`crate::OdpMuenster`].
#[derive(Debug)]
pub struct StadtMuenster {
    executor: RequestExecutor,
}

impl StadtMuenster {
    /// Creates a client pointed at the production city website.
    ///
    /// # Errors
    ///
    /// Returns [`MuensterError::InvalidTimeout`] if `timeout_secs` is not a
    /// finite positive number.
    pub fn new(timeout_secs: f64, session: Option<Client>) -> Result<Self, MuensterError> {
        Self::with_base_url(timeout_secs, session, DEFAULT_STADT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MuensterError::InvalidTimeout`] for a bad timeout or
    /// [`MuensterError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        timeout_secs: f64,
        session: Option<Client>,
        base_url: &str,
    ) -> Result<Self, MuensterError> {
        let session = session.map_or_else(Session::idle, Session::external);
        Ok(Self {
            executor: RequestExecutor::new(STADT_VARIANT, base_url, timeout_secs, session)?,
        })
    }

    /// # Errors
    ///
    /// Same as [`StadtMuenster::with_base_url`].
    pub fn from_config(
        config: &ClientConfig,
        session: Option<Client>,
    ) -> Result<Self, MuensterError> {
        Self::with_base_url(config.request_timeout_secs, session, &config.stadt_base_url)
    }

    /// Fetches every parking garage in the order the feed lists them.
    ///
    /// # Errors
    ///
    /// - Any error of [`StadtMuenster::request`].
    /// - [`MuensterError::Deserialize`] if the body has no `features` array.
    /// - [`MuensterError::InvalidFeature`] if a feature lacks counts or
    ///   usable coordinates.
    pub async fn garages(&self) -> Result<Vec<Garage>, MuensterError> {
        let body = self
            .request(GARAGES_PATH, Method::GET, &[("id", GARAGES_DATASET_ID)])
            .await?;
        let garages = garages_from_collection(body)?;
        tracing::debug!(count = garages.len(), "fetched parking garages");
        Ok(garages)
    }

    /// Handles a request to the city website and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`MuensterError::Timeout`], [`MuensterError::Connection`] or
    ///   [`MuensterError::SessionClosed`] for network-side failures.
    /// - [`MuensterError::UnexpectedContentType`] if the answer is not
    ///   labelled `text/html`.
    /// - [`MuensterError::Deserialize`] if the body is not valid JSON.
    pub async fn request(
        &self,
        uri: &str,
        method: Method,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MuensterError> {
        self.executor.request(uri, method, params).await
    }

    /// Closes the session if this client created it. Safe to call repeatedly.
    pub fn close(&self) {
        self.executor.close();
    }

    #[must_use]
    pub fn owns_session(&self) -> bool {
        self.executor.session().owns_session()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.executor.session().is_closed()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.executor.timeout()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.executor.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_production_site() {
        let client = StadtMuenster::new(10.0, None).unwrap();
        assert_eq!(client.base_url().as_str(), "https://stadt-muenster.de/");
    }

    #[test]
    fn garages_url_targets_dataset_page() {
        let client = StadtMuenster::new(10.0, None).unwrap();
        let url = client.executor.build_url(GARAGES_PATH).unwrap();
        assert_eq!(url.as_str(), "https://stadt-muenster.de/index.php");
    }

    #[test]
    fn rejects_invalid_timeout() {
        let result = StadtMuenster::new(-1.0, None);
        assert!(
            matches!(result, Err(MuensterError::InvalidTimeout(_))),
            "expected InvalidTimeout, got: {result:?}"
        );
    }
}
