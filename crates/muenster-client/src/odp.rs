//! Client for the Open Data Platform of Münster (`opendata.stadt-muenster.de`).

use std::time::Duration;

use muenster_core::app_config::DEFAULT_ODP_BASE_URL;
use muenster_core::ClientConfig;
use reqwest::{Client, Method, Url};

use crate::error::MuensterError;
use crate::executor::{ApiVariant, RequestExecutor};
use crate::session::Session;

const ODP_VARIANT: ApiVariant = ApiVariant {
    name: "Open Data Platform API",
    accept: "application/json",
    expected_content_type: "application/json",
    user_agent: concat!("muenster-client/", env!("CARGO_PKG_VERSION"), " (odp)"),
};

/// Client for the Open Data Platform API of Münster.
///
/// Pass an existing [`reqwest::Client`] to share a connection pool; it stays
/// owned by the caller and [`close`](Self::close) never touches it. Without
/// one, a session is created on the first request and released by `close`
/// or when the client is dropped.
#[derive(Debug)]
pub struct OdpMuenster {
    executor: RequestExecutor,
}

impl OdpMuenster {
    /// Creates a client pointed at the production portal.
    ///
    /// # Errors
    ///
    /// Returns [`MuensterError::InvalidTimeout`] if `timeout_secs` is not a
    /// finite positive number.
    pub fn new(timeout_secs: f64, session: Option<Client>) -> Result<Self, MuensterError> {
        Self::with_base_url(timeout_secs, session, DEFAULT_ODP_BASE_URL)
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
            executor: RequestExecutor::new(ODP_VARIANT, base_url, timeout_secs, session)?,
        })
    }

    /// Creates a client from environment-derived configuration.
    ///
    /// # Errors
    ///
    /// Same as [`OdpMuenster::with_base_url`].
    pub fn from_config(
        config: &ClientConfig,
        session: Option<Client>,
    ) -> Result<Self, MuensterError> {
        Self::with_base_url(config.request_timeout_secs, session, &config.odp_base_url)
    }

    /// Handles a request to the portal and returns the decoded JSON body.
    ///
    /// `uri` is relative to the dataset root, e.g. `"parkhaeuser"`.
    ///
    /// # Errors
    ///
    /// - [`MuensterError::Timeout`], [`MuensterError::Connection`] or
    ///   [`MuensterError::SessionClosed`] for network-side failures.
    /// - [`MuensterError::UnexpectedContentType`] if the answer is not
    ///   `application/json`.
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

    /// `true` once this client has created its own session.
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
