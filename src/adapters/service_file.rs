use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::{AppError, ServiceDescription};
use crate::ports::ServiceHost;

/// Service description loaded from a `serverless.yml` or `serverless.json` file.
#[derive(Debug, Clone)]
pub struct FileServiceHost {
    path: PathBuf,
    service: ServiceDescription,
}

impl FileServiceHost {
    /// Load the description at `path`. `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let value: Value = if is_json(&path) {
            serde_json::from_str(&content)
                .map_err(|e| AppError::parse_error(path.display().to_string(), e))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::parse_error(path.display().to_string(), e))?
        };

        Ok(Self { service: ServiceDescription::from_value(value)?, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the current description in the format of the source file.
    pub fn render(&self) -> Result<String, AppError> {
        if is_json(&self.path) {
            let mut out = serde_json::to_string_pretty(&self.service)
                .map_err(|e| AppError::parse_error("service description", e))?;
            out.push('\n');
            Ok(out)
        } else {
            serde_yaml::to_string(&self.service)
                .map_err(|e| AppError::parse_error("service description", e))
        }
    }

    /// Write the current description to `target`, in the source file's format.
    pub fn save_to(&self, target: &Path) -> Result<(), AppError> {
        fs::write(target, self.render()?)?;
        Ok(())
    }
}

impl ServiceHost for FileServiceHost {
    fn service(&self) -> &ServiceDescription {
        &self.service
    }

    fn extend_configuration(&mut self, path: &[&str], value: Value) -> Result<(), AppError> {
        set_path(self.service.fields_mut(), path, value)
    }
}

/// Assign `value` at `path`, creating intermediate mappings as needed.
pub(crate) fn set_path(
    root: &mut Map<String, Value>,
    path: &[&str],
    value: Value,
) -> Result<(), AppError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(AppError::config_error("Configuration path must not be empty"));
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let entry =
            current.entry(segment.to_string()).or_insert_with(|| Value::Object(Map::new()));
        if entry.is_null() {
            *entry = Value::Object(Map::new());
        }
        current = entry.as_object_mut().ok_or_else(|| {
            AppError::config_error(format!(
                "Cannot extend '{}': '{}' is not a mapping",
                path.join("."),
                parents[..=depth].join(".")
            ))
        })?;
    }

    current.insert(last.to_string(), value);
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
