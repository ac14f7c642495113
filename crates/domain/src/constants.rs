//! Domain constants
//!
//! Centralized location for tunable defaults and environment variable names.

// Remote API defaults
pub const DEFAULT_BASE_URL: &str = "https://api.finrelay.dev/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Retry configuration
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

// Client-side admission control (cooperative free-tier default)
pub const DEFAULT_RATE_LIMIT: u32 = 5;

// Environment variables
pub const ENV_API_KEY: &str = "FINRELAY_API_KEY";
pub const ENV_BASE_URL: &str = "FINRELAY_BASE_URL";
pub const ENV_MAX_RETRIES: &str = "FINRELAY_MAX_RETRIES";
pub const ENV_RATE_LIMIT: &str = "FINRELAY_RATE_LIMIT";
