use serde_json::Value;

use super::service_file::set_path;
use crate::domain::{AppError, ServiceDescription};
use crate::ports::ServiceHost;

/// In-memory host that records every `extend_configuration` call.
#[derive(Debug, Clone, Default)]
pub struct MemoryServiceHost {
    service: ServiceDescription,
    extensions: Vec<(Vec<String>, Value)>,
}

impl MemoryServiceHost {
    pub fn new(service: ServiceDescription) -> Self {
        Self { service, extensions: Vec::new() }
    }

    pub fn from_value(value: Value) -> Result<Self, AppError> {
        Ok(Self::new(ServiceDescription::from_value(value)?))
    }

    /// Every `(path, value)` passed to `extend_configuration`, in call order.
    pub fn extensions(&self) -> &[(Vec<String>, Value)] {
        &self.extensions
    }

    pub fn into_service(self) -> ServiceDescription {
        self.service
    }
}

impl ServiceHost for MemoryServiceHost {
    fn service(&self) -> &ServiceDescription {
        &self.service
    }

    fn extend_configuration(&mut self, path: &[&str], value: Value) -> Result<(), AppError> {
        set_path(self.service.fields_mut(), path, value.clone())?;
        self.extensions.push((path.iter().map(|s| s.to_string()).collect(), value));
        Ok(())
    }
}
