/// Production base URL of the Open Data Platform of Münster.
pub const DEFAULT_ODP_BASE_URL: &str = "https://opendata.stadt-muenster.de/dataset/";

/// Production base URL of the city website.
pub const DEFAULT_STADT_BASE_URL: &str = "https://stadt-muenster.de/";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub request_timeout_secs: f64,
    pub log_level: String,
    pub odp_base_url: String,
    pub stadt_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: "info".to_string(),
            odp_base_url: DEFAULT_ODP_BASE_URL.to_string(),
            stadt_base_url: DEFAULT_STADT_BASE_URL.to_string(),
        }
    }
}
