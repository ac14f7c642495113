//! Response formatting at the tool boundary
//!
//! The outer protocol layer receives strings: pretty-printed JSON for a
//! successful payload, or a single-field `{"error": "..."}` object for any
//! failure. Rendering is total; a formatting failure itself degrades to the
//! error shape instead of panicking.

use finrelay_domain::{RelayError, Result};
use serde_json::{json, Value};

/// Render a pipeline result as the outward-facing string.
pub fn render(result: Result<Value>) -> String {
    match result {
        Ok(payload) => serde_json::to_string_pretty(&payload)
            .unwrap_or_else(|err| render_error_message(&format!("Failed to render response: {err}"))),
        Err(err) => render_error(&err),
    }
}

/// Render one classified error as the `{"error": "..."}` shape.
pub fn render_error(err: &RelayError) -> String {
    render_error_message(&err.to_string())
}

fn render_error_message(message: &str) -> String {
    json!({ "error": message }).to_string()
}
