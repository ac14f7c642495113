//! Query parameter model for outbound requests
//!
//! `QueryParams` is an insertion-ordered bag of named values; the transport
//! layer serializes it into the final query string. Ordering is preserved so
//! serialized output is deterministic.
//!
//! Serialization follows the remote API's convention: absent values are never
//! inserted, empty strings and boolean `false` are dropped, while boolean
//! `true` and numeric `0` are emitted literally. The `false`/`true` asymmetry
//! is preserved remote behavior (several endpoints treat flags as
//! presence-only), which means a `false` flag cannot round-trip through this
//! layer.

use serde_json::Value;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Plain string value.
    Text(String),
    /// Integer value, serialized in decimal form.
    Integer(i64),
    /// Floating point value, serialized in its natural textual form.
    Number(f64),
    /// Boolean flag; `false` is dropped at serialization time.
    Flag(bool),
    /// List value, serialized as one `name=element` pair per element.
    List(Vec<String>),
}

impl QueryValue {
    /// Convert a JSON value into a query value.
    ///
    /// Returns `None` for `null` (treated as absent) and for shapes that have
    /// no query representation (objects, heterogeneous arrays).
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Flag(*flag)),
            Value::Number(num) => {
                if let Some(int) = num.as_i64() {
                    Some(Self::Integer(int))
                } else {
                    num.as_f64().map(Self::Number)
                }
            }
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Array(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(text) => elements.push(text.clone()),
                        Value::Number(num) => elements.push(num.to_string()),
                        _ => return None,
                    }
                }
                Some(Self::List(elements))
            }
            Value::Object(_) => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Insertion-ordered mapping from parameter name to value.
///
/// Keys are emitted verbatim at serialization time; a caller-supplied literal
/// `[]` suffix (the remote API's bracket convention for list parameters) is
/// neither added nor stripped by this layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Create an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, keeping insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Append a parameter only when a value is present.
    pub fn push_opt(&mut self, name: impl Into<String>, value: Option<impl Into<QueryValue>>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, QueryValue)> {
        self.entries.iter()
    }

    /// Whether the bag holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries, counting lists once.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn push_opt_skips_absent_values() {
        let mut params = QueryParams::new();
        params.push_opt("present", Some("yes"));
        params.push_opt("absent", None::<&str>);

        assert_eq!(params.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut params = QueryParams::new();
        params.push("b", 2_i64);
        params.push("a", 1_i64);
        params.push("c", 3_i64);

        let names: Vec<&str> = params.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn json_conversions_cover_scalar_shapes() {
        assert_eq!(QueryValue::from_json(&json!(null)), None);
        assert_eq!(QueryValue::from_json(&json!(true)), Some(QueryValue::Flag(true)));
        assert_eq!(QueryValue::from_json(&json!(0)), Some(QueryValue::Integer(0)));
        assert_eq!(QueryValue::from_json(&json!(2.5)), Some(QueryValue::Number(2.5)));
        assert_eq!(
            QueryValue::from_json(&json!("AAPL")),
            Some(QueryValue::Text("AAPL".to_string()))
        );
        assert_eq!(
            QueryValue::from_json(&json!(["AAPL", "MSFT"])),
            Some(QueryValue::List(vec!["AAPL".to_string(), "MSFT".to_string()]))
        );
    }

    #[test]
    fn json_objects_have_no_query_representation() {
        assert_eq!(QueryValue::from_json(&json!({"nested": 1})), None);
        assert_eq!(QueryValue::from_json(&json!([{"nested": 1}])), None);
    }
}
