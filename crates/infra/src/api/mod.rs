//! Remote API access: endpoint client, codecs, and the generic tool handler

pub mod client;
pub mod handler;
pub mod params;

pub use client::EndpointClient;
pub use handler::EndpointHandler;
pub use params::{encode_path_param, serialize_query};
