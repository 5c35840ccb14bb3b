//! Host framework port definition.

use serde_json::Value;

use crate::domain::{AppError, ServiceDescription};

/// The host framework's live service description.
pub trait ServiceHost {
    /// Current service description.
    fn service(&self) -> &ServiceDescription;

    /// Replace the value at `path` in the live configuration.
    fn extend_configuration(&mut self, path: &[&str], value: Value) -> Result<(), AppError>;
}
