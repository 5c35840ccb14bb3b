//! Plugin configuration read from `custom.pklConfig`.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::AppError;

/// Key under `custom` holding the plugin configuration.
pub const CONFIG_KEY: &str = "pklConfig";

/// Typed view of `custom.pklConfig`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PklConfig {
    /// Path to the `.pkl` source document.
    #[serde(default)]
    pub file: Option<String>,
    /// Bucket upload settings; absent disables upload and removal.
    #[serde(default)]
    pub upload: Option<UploadConfig>,
}

impl PklConfig {
    /// Parse the plugin configuration from the `custom` section.
    ///
    /// A missing `custom` or `pklConfig` yields the empty configuration; a
    /// present but malformed block is an error.
    pub fn from_custom(custom: Option<&Value>) -> Result<Self, AppError> {
        let Some(raw) = custom.and_then(|c| c.get(CONFIG_KEY)) else {
            return Ok(Self::default());
        };
        if raw.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(raw.clone())
            .map_err(|e| AppError::parse_error(format!("custom.{CONFIG_KEY}"), e))
    }

    /// The configured source file, required by every evaluation.
    pub fn file(&self) -> Result<&str, AppError> {
        match self.file.as_deref() {
            Some(file) if !file.is_empty() => Ok(file),
            _ => Err(AppError::MissingFile),
        }
    }
}

/// Upload target for the rendered configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Bucket receiving the rendered document.
    pub bucket: String,
    /// Create the bucket when it does not exist.
    #[serde(default = "default_true")]
    pub create: bool,
    /// Output format passed to `pkl eval -f`.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_true() -> bool {
    true
}

/// Output formats supported by `pkl eval`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Xml,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
