//! Path and query codecs for outbound requests
//!
//! Pure functions; no I/O. Path segments are percent-encoded and guarded
//! against traversal sequences. Query serialization preserves insertion
//! order and applies the remote API's drop/keep convention: empty strings
//! and boolean `false` are omitted, boolean `true` and numeric `0` are
//! emitted literally.

use finrelay_domain::{QueryParams, QueryValue, RelayError, Result};
use serde_json::Value;

/// Encode one scalar into a URL-safe path segment.
///
/// # Errors
///
/// Returns `RelayError::Validation` when the value is absent or JSON null,
/// is not a scalar, stringifies to an empty segment, or contains `/`, `\`
/// or `..` (path-traversal guard).
pub fn encode_path_param(name: &str, value: Option<&Value>) -> Result<String> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Err(RelayError::Validation(format!(
            "{name}: required path parameter is missing"
        )));
    };

    let text = match value {
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => {
            return Err(RelayError::Validation(format!(
                "{name}: cannot be used as a path parameter"
            )));
        }
    };

    if text.is_empty() {
        return Err(RelayError::Validation(format!("{name}: must not be empty")));
    }

    if text.contains('/') || text.contains('\\') || text.contains("..") {
        return Err(RelayError::Validation(format!(
            "{name}: contains characters that are not allowed in a path segment"
        )));
    }

    Ok(urlencoding::encode(&text).into_owned())
}

/// Serialize a parameter bag into a query string, without the leading `?`.
///
/// Keys are emitted verbatim (a literal `[]` suffix is neither added nor
/// stripped); values are percent-encoded. List values produce one
/// `name=element` pair per element. An entirely dropped bag serializes to
/// the empty string.
pub fn serialize_query(params: &QueryParams) -> String {
    let mut pairs: Vec<String> = Vec::with_capacity(params.len());

    for (name, value) in params.iter() {
        match value {
            QueryValue::Text(text) => {
                // Empty strings carry no information for any endpoint; the
                // remote treats them the same as an omitted parameter.
                if !text.is_empty() {
                    pairs.push(pair(name, text));
                }
            }
            QueryValue::Integer(int) => pairs.push(pair(name, &int.to_string())),
            QueryValue::Number(num) => pairs.push(pair(name, &num.to_string())),
            QueryValue::Flag(true) => pairs.push(pair(name, "true")),
            // Presence-only flag convention: an explicit `false` is dropped,
            // so it cannot round-trip through this layer.
            QueryValue::Flag(false) => {}
            QueryValue::List(items) => {
                for item in items {
                    pairs.push(pair(name, item));
                }
            }
        }
    }

    pairs.join("&")
}

fn pair(name: &str, value: &str) -> String {
    format!("{name}={}", urlencoding::encode(value))
}
