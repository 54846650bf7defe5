use std::time::Duration;

use thiserror::Error;

/// Broad classification of a [`MuensterError`].
///
/// Lets callers handle every network-side failure in one arm without listing
/// each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Timeout, DNS, transport failure, non-2xx status, or a closed session.
    Connection,
    /// The server answered, but not with what the client expects.
    Validation,
    /// The client was constructed with invalid settings.
    Config,
}

/// Errors returned by the Münster API clients.
#[derive(Debug, Error)]
pub enum MuensterError {
    /// The request did not complete within the configured timeout.
    #[error("timeout occurred while connecting to the {api} (after {timeout:?})")]
    Timeout {
        api: &'static str,
        timeout: Duration,
    },

    /// DNS, TLS, connection, or non-2xx failure from the underlying HTTP client.
    #[error("error occurred while communicating with the {api}: {source}")]
    Connection {
        api: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The client owned its session and [`close`](crate::OdpMuenster::close)
    /// has already released it.
    #[error("the {api} client session has been closed")]
    SessionClosed { api: &'static str },

    /// 2xx response whose `Content-Type` does not match the API variant.
    #[error("unexpected content type response from the {api}: {content_type:?}")]
    UnexpectedContentType {
        api: &'static str,
        content_type: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A garage feature is missing a count or carries unusable coordinates.
    #[error("invalid garage feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },

    /// The request timeout is zero, negative, or not a number.
    #[error("invalid request timeout: {0} seconds")]
    InvalidTimeout(f64),

    /// The base URL does not parse, or a path cannot be joined onto it.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl MuensterError {
    /// Classifies the error so callers can branch on the failure family.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } | Self::SessionClosed { .. } => {
                ErrorKind::Connection
            }
            Self::UnexpectedContentType { .. }
            | Self::Deserialize { .. }
            | Self::InvalidFeature { .. } => ErrorKind::Validation,
            Self::InvalidTimeout(_) | Self::InvalidBaseUrl { .. } => ErrorKind::Config,
        }
    }

    #[must_use]
    pub fn is_connection(&self) -> bool {
        self.kind() == ErrorKind::Connection
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
