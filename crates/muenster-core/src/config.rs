use crate::app_config::{
    ClientConfig, DEFAULT_ODP_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STADT_BASE_URL,
};
use crate::ConfigError;

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_client_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_client_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_client_config_from_env() -> Result<ClientConfig, ConfigError> {
    build_client_config(|key| std::env::var(key))
}

/// Build client configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to the production
/// defaults in [`crate::app_config`].
fn build_client_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let request_timeout_secs = match lookup("MUENSTER_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => parse_timeout_secs("MUENSTER_REQUEST_TIMEOUT_SECS", &raw)?,
        Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
    };
    let log_level = or_default("MUENSTER_LOG_LEVEL", "info");
    let odp_base_url = parse_base_url(
        "MUENSTER_ODP_BASE_URL",
        &or_default("MUENSTER_ODP_BASE_URL", DEFAULT_ODP_BASE_URL),
    )?;
    let stadt_base_url = parse_base_url(
        "MUENSTER_STADT_BASE_URL",
        &or_default("MUENSTER_STADT_BASE_URL", DEFAULT_STADT_BASE_URL),
    )?;

    Ok(ClientConfig {
        request_timeout_secs,
        log_level,
        odp_base_url,
        stadt_base_url,
    })
}

/// Parse a timeout in (possibly fractional) seconds. Must be finite and positive.
fn parse_timeout_secs(var: &str, raw: &str) -> Result<f64, ConfigError> {
    let secs = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("timeout must be a positive number of seconds, got {raw}"),
        });
    }
    Ok(secs)
}

/// Only `http` and `https` bases are accepted.
fn parse_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
