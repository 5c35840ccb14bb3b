//! Namespacing of evaluated PKL keys.

use serde_json::{Map, Value};

use super::AppError;

/// Literal prefix reserved for PKL-sourced placeholders.
pub const NAMESPACE: &str = "pkl";

/// Prefix a single key: `key` becomes `pkl:key`.
pub fn namespaced_key(key: &str) -> String {
    format!("{NAMESPACE}:{key}")
}

/// Prefix every top-level key; nested values are carried over unchanged.
pub fn namespace(config: &Map<String, Value>) -> Map<String, Value> {
    config.iter().map(|(key, value)| (namespaced_key(key), value.clone())).collect()
}

/// Parse `pkl eval -f json` output into its top-level mapping.
pub fn parse_evaluated(raw: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::parse_error("PKL output", "expected a JSON object")),
        Err(e) => Err(AppError::parse_error("PKL output", e)),
    }
}
