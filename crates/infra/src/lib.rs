//! # FinRelay Infrastructure
//!
//! Adapters that connect the core dispatch logic to the outside world:
//! - `http`: reqwest-based client with bounded retry and backoff
//! - `api`: endpoint client (auth, classification), path/query codecs, and
//!   the generic data-driven tool handler
//! - `config`: environment-variable configuration loading

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod http;

// Re-export commonly used items
pub use api::client::EndpointClient;
pub use api::handler::EndpointHandler;
pub use api::params::{encode_path_param, serialize_query};
pub use http::HttpClient;
