pub mod bucket_object;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod namespace;
pub mod plugin_config;
pub mod service;
pub mod splice;

pub use bucket_object::{BucketObject, object_key};
pub use context::build_context;
pub use error::{AppError, StorageError};
pub use lifecycle::{CommandSpec, HookAction};
pub use namespace::{NAMESPACE, namespace};
pub use plugin_config::{OutputFormat, PklConfig, UploadConfig};
pub use service::{CONTEXT_FIELDS, ServiceDescription};
pub use splice::splice_fields;
