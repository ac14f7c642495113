//! Environment configuration loader
//!
//! ## Environment Variables
//! - `FINRELAY_API_KEY`: bearer credential for the remote API (required)
//! - `FINRELAY_BASE_URL`: base URL override (optional, validated)
//! - `FINRELAY_MAX_RETRIES`: total attempt budget per call (optional,
//!   default 3; unset or invalid values fall back to the default)
//! - `FINRELAY_RATE_LIMIT`: admissions per sliding window (optional,
//!   default 5; unset or invalid values fall back to the default)
//!
//! A missing credential is a configuration error, never a crash. Malformed
//! tunables are tolerated with a warning so a typo in an optional variable
//! cannot take the adapter down.

use std::time::Duration;

use finrelay_domain::constants::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RATE_LIMIT, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_BASE_URL,
    ENV_MAX_RETRIES, ENV_RATE_LIMIT,
};
use finrelay_domain::{RelayConfig, RelayError, Result};
use tracing::warn;
use url::Url;

/// Load adapter configuration from environment variables.
///
/// # Errors
/// Returns `RelayError::Config` if:
/// - `FINRELAY_API_KEY` is missing or blank
/// - `FINRELAY_BASE_URL` is set but is not a valid absolute URL
pub fn load_from_env() -> Result<RelayConfig> {
    let api_key = env_var(ENV_API_KEY)?;

    let base_url = match std::env::var(ENV_BASE_URL) {
        Ok(raw) => {
            Url::parse(&raw)
                .map_err(|err| RelayError::Config(format!("Invalid {ENV_BASE_URL}: {err}")))?;
            raw.trim_end_matches('/').to_string()
        }
        Err(_) => RelayConfig::default().base_url,
    };

    let max_attempts = env_tunable(ENV_MAX_RETRIES, DEFAULT_MAX_ATTEMPTS);
    let rate_limit = env_tunable(ENV_RATE_LIMIT, DEFAULT_RATE_LIMIT);

    Ok(RelayConfig {
        base_url,
        api_key: Some(api_key),
        timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        max_attempts,
        rate_limit,
    })
}

/// Read a required environment variable, rejecting blank values.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            RelayError::Config(format!("Missing required environment variable: {key}"))
        })
}

/// Parse an optional numeric tunable, falling back to the default when the
/// variable is unset or unparsable.
fn env_tunable<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, %default, "ignoring unparsable tunable");
                default
            }
        },
        Err(_) => default,
    }
}
