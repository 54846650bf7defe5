//! Shared request pipeline for both Münster API variants.
//!
//! Joins the relative path onto the variant's base URL, attaches the `Accept`
//! and `User-Agent` headers, bounds the whole exchange with the client
//! timeout, and checks the `Content-Type` before decoding the body as JSON.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Url};

use crate::error::MuensterError;
use crate::session::{Acquired, Session};

/// Static description of one API variant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ApiVariant {
    /// Human-readable name used in error messages and logs.
    pub(crate) name: &'static str,
    pub(crate) accept: &'static str,
    /// Substring the response `Content-Type` must contain.
    pub(crate) expected_content_type: &'static str,
    pub(crate) user_agent: &'static str,
}

#[derive(Debug)]
pub(crate) struct RequestExecutor {
    variant: ApiVariant,
    base_url: Url,
    timeout: Duration,
    session: Session,
}

impl RequestExecutor {
    /// # Errors
    ///
    /// - [`MuensterError::InvalidTimeout`] if `timeout_secs` is not a finite
    ///   positive number.
    /// - [`MuensterError::InvalidBaseUrl`] if `base_url` does not parse.
    pub(crate) fn new(
        variant: ApiVariant,
        base_url: &str,
        timeout_secs: f64,
        session: Session,
    ) -> Result<Self, MuensterError> {
        Ok(Self {
            variant,
            base_url: normalise_base_url(base_url)?,
            timeout: timeout_from_secs(timeout_secs)?,
            session,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    /// Joins `uri` onto the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`MuensterError::InvalidBaseUrl`] if the join fails.
    pub(crate) fn build_url(&self, uri: &str) -> Result<Url, MuensterError> {
        self.base_url
            .join(uri.trim_start_matches('/'))
            .map_err(|e| MuensterError::InvalidBaseUrl {
                url: format!("{}{uri}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Sends one request and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`MuensterError::Timeout`] if the exchange exceeds the timeout.
    /// - [`MuensterError::Connection`] on transport failure or non-2xx status.
    /// - [`MuensterError::SessionClosed`] if the owned session was closed.
    /// - [`MuensterError::UnexpectedContentType`] if the `Content-Type` does
    ///   not match the variant.
    /// - [`MuensterError::Deserialize`] if the body is not valid JSON.
    pub(crate) async fn request(
        &self,
        uri: &str,
        method: Method,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MuensterError> {
        let url = self.build_url(uri)?;
        let client = self.client()?;
        let api = self.variant.name;

        tracing::debug!(api, %method, %url, "sending request");

        let exchange = async {
            let mut request = client
                .request(method, url.clone())
                .header(ACCEPT, self.variant.accept)
                .header(USER_AGENT, self.variant.user_agent);
            if !params.is_empty() {
                request = request.query(params);
            }

            let response = request
                .send()
                .await
                .map_err(|source| MuensterError::Connection { api, source })?;
            let status = response.status();
            let response = response.error_for_status().map_err(|source| {
                tracing::warn!(api, %url, %status, "non-success status");
                MuensterError::Connection { api, source }
            })?;

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_owned();
            let body = response
                .text()
                .await
                .map_err(|source| MuensterError::Connection { api, source })?;
            Ok::<_, MuensterError>((content_type, body))
        };

        let (content_type, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| MuensterError::Timeout {
                api,
                timeout: self.timeout,
            })??;

        if !content_type.contains(self.variant.expected_content_type) {
            tracing::warn!(api, %url, content_type = %content_type, "unexpected content type");
            return Err(MuensterError::UnexpectedContentType {
                api,
                content_type,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| MuensterError::Deserialize {
            context: url.to_string(),
            source,
        })
    }

    /// Releases the session if this executor created it.
    pub(crate) fn close(&self) {
        self.session.close();
    }

    fn client(&self) -> Result<Client, MuensterError> {
        let api = self.variant.name;
        match self.session.acquire() {
            Ok(Acquired::Ready(client)) => Ok(client),
            Ok(Acquired::Closed) => Err(MuensterError::SessionClosed { api }),
            Err(source) => Err(MuensterError::Connection { api, source }),
        }
    }
}

/// Ensures the base URL ends with exactly one slash so that
/// [`Url::join`] appends to the base path rather than replacing its last segment.
fn normalise_base_url(base_url: &str) -> Result<Url, MuensterError> {
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| MuensterError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

fn timeout_from_secs(secs: f64) -> Result<Duration, MuensterError> {
    if secs <= 0.0 {
        return Err(MuensterError::InvalidTimeout(secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| MuensterError::InvalidTimeout(secs))
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
