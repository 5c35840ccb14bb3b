//! Service description owned by the host framework.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AppError, PklConfig};

/// Top-level service keys the plugin reads and may replace, in render order.
pub const CONTEXT_FIELDS: [&str; 13] = [
    "service",
    "custom",
    "plugins",
    "provider",
    "functions",
    "resources",
    "package",
    "frameworkVersion",
    "app",
    "tenant",
    "org",
    "layers",
    "outputs",
];

/// The host's service description: top-level keys mapped to arbitrary values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceDescription(Map<String, Value>);

impl ServiceDescription {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from any JSON value; non-objects are rejected.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(AppError::parse_error(
                "service description",
                format!("expected a mapping, found {}", value_kind(&other)),
            )),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Service name, from `service: name` or the object form `service: { name }`.
    pub fn service_name(&self) -> Result<&str, AppError> {
        let name = match self.0.get("service") {
            Some(Value::String(name)) => Some(name.as_str()),
            Some(Value::Object(obj)) => obj.get("name").and_then(Value::as_str),
            _ => None,
        };
        name.filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::config_error("Service name is not defined"))
    }

    /// Parse `custom.pklConfig`.
    pub fn pkl_config(&self) -> Result<PklConfig, AppError> {
        PklConfig::from_custom(self.0.get("custom"))
    }
}

/// Host-side truthiness: null, `false`, zero and the empty string are unset.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
