//! Adapter configuration structures

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_RATE_LIMIT, DEFAULT_TIMEOUT_SECS,
};

/// Configuration for the FinRelay adapter
///
/// Usually produced by the environment loader in the infrastructure layer;
/// constructed directly in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Base URL of the remote market-data API.
    pub base_url: String,
    /// Bearer credential. `None` means unconfigured; the executor refuses to
    /// issue requests without it.
    pub api_key: Option<String>,
    /// Per-attempt request deadline.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Total attempt budget per logical call (initial try + retries).
    pub max_attempts: usize,
    /// Admissions per sliding window for the client-side governor.
    pub rate_limit: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }
}

impl RelayConfig {
    /// Configuration with a credential set; other fields keep their defaults.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self { api_key: Some(api_key.into()), ..Self::default() }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
