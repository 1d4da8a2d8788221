//! JSON body handling: parse the response, print it back with 2-space indentation.

use serde_json::Value;

/// Parse a response body as an opaque JSON value. Object key order is kept.
pub fn parse(body: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Human-readable text of `value`, nested with two spaces, no trailing newline.
pub fn to_pretty_text(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Number of records in the export, when it has a recognizable list shape:
/// a top-level array or a `walletOperations` array.
pub fn record_count(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => map
            .get("walletOperations")
            .and_then(Value::as_array)
            .map(Vec::len),
        _ => None,
    }
}

/// True when `count` reached the page size, so records past it may be missing.
pub fn may_be_truncated(count: usize, limit: u64) -> bool {
    count as u64 >= limit
}
