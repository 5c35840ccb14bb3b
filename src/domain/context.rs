//! Serialized template source built from the service description.

use serde_json::{Map, Value};

use super::service::{CONTEXT_FIELDS, ServiceDescription, is_truthy};
use super::AppError;

/// Pick the truthy whitelisted fields, in whitelist order.
pub fn context_fields(service: &ServiceDescription) -> Map<String, Value> {
    CONTEXT_FIELDS
        .iter()
        .filter_map(|&key| {
            service.get(key).filter(|v| is_truthy(v)).map(|v| (key.to_string(), v.clone()))
        })
        .collect()
}

/// Render the whitelisted fields as pretty-printed JSON.
pub fn build_context(service: &ServiceDescription) -> Result<String, AppError> {
    serde_json::to_string_pretty(&Value::Object(context_fields(service)))
        .map_err(|e| AppError::parse_error("service context", e))
}
