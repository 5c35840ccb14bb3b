use std::io;

use thiserror::Error;

/// Library-wide error type for sls-pkl operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// `custom.pklConfig.file` is not set.
    #[error("No PKL file found in configuration")]
    MissingFile,

    /// The pkl binary could not be run or exited unsuccessfully.
    #[error("PKL evaluation failed running '{command}': {details}")]
    Evaluation { command: String, details: String },

    /// Upload bucket is absent and creation is disabled.
    #[error("No buckets found matching {0}")]
    BucketNotFound(String),

    /// Object storage request failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Placeholder expansion failed.
    #[error("Template rendering failed: {0}")]
    TemplateRender(String),

    /// Lifecycle event with no registered handler.
    #[error("No hook registered for lifecycle event '{0}'")]
    UnknownHook(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    Parse { what: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn parse_error(what: impl Into<String>, details: impl std::fmt::Display) -> Self {
        AppError::Parse { what: what.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit states.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::MissingFile
            | AppError::TemplateRender(_)
            | AppError::UnknownHook(_)
            | AppError::Parse { .. } => io::ErrorKind::InvalidInput,
            AppError::BucketNotFound(_) => io::ErrorKind::NotFound,
            AppError::Evaluation { .. } | AppError::Storage(_) => io::ErrorKind::Other,
        }
    }
}

/// Failure reported by an object storage provider.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The bucket already exists (owned by this account or another).
    #[error("Bucket {0} already exists")]
    BucketAlreadyExists(String),

    /// Any other provider failure.
    #[error("Storage request '{operation}' failed: {details}")]
    Request { operation: &'static str, details: String },
}

impl StorageError {
    pub fn request(operation: &'static str, details: impl std::fmt::Display) -> Self {
        StorageError::Request { operation, details: details.to_string() }
    }
}
