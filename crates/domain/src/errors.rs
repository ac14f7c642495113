//! Error types used throughout the adapter
//!
//! Every failure the pipeline can produce maps to exactly one variant here.
//! Errors are values at the tool boundary; nothing is allowed to panic past
//! it. Retry handling is confined to the transport layer and only ever
//! applies to `Server`, `Network` and `Timeout`.

use thiserror::Error;

/// Main error type for FinRelay
#[derive(Error, Debug)]
pub enum RelayError {
    /// Missing or invalid configuration; surfaced before any network attempt.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The argument bag failed schema validation. The message lists every
    /// field-level complaint joined with "; ".
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The tool name is not present in the verified handler registry.
    #[error("Unknown tool: {0}")]
    UnknownAction(String),

    /// The remote answered with a 4xx other than 429. Never retried.
    #[error("Request failed with status {status}: {message}")]
    Client { status: u16, message: String },

    /// The remote answered 429. Never retried automatically; the caller
    /// decides whether to re-issue.
    #[error("API rate limit exceeded: {0}")]
    RateLimited(String),

    /// The remote answered 5xx; retried up to the attempt budget before
    /// being surfaced.
    #[error("Server error with status {status}: {message}")]
    Server { status: u16, message: String },

    /// Transport-level failure (connection refused, DNS, TLS). Retried up
    /// to the attempt budget.
    #[error("Network error: {0}")]
    Network(String),

    /// The call exceeded its deadline or was aborted externally.
    #[error("Request timed out")]
    Timeout,

    /// A 2xx response carried a body that is not valid JSON. Never retried.
    #[error("Invalid JSON in response body: {0}")]
    Parse(String),

    /// A handler failed outside the classified taxonomy after a successful
    /// dispatch.
    #[error("Tool '{action}' failed: {message}")]
    Handler { action: String, message: String },
}

impl RelayError {
    /// Stable label for metrics and structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::UnknownAction(_) => "unknown_action",
            Self::Client { .. } => "client",
            Self::RateLimited(_) => "rate_limited",
            Self::Server { .. } => "server",
            Self::Network(_) => "network",
            Self::Timeout => "timeout",
            Self::Parse(_) => "parse",
            Self::Handler { .. } => "handler",
        }
    }

    /// Whether the transport layer may retry a request that produced this
    /// error. Everything else is surfaced on first occurrence.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Network(_) | Self::Timeout)
    }
}

/// Result type alias for FinRelay operations
pub type Result<T> = std::result::Result<T, RelayError>;
