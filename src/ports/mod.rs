mod config_evaluator;
mod object_storage;
mod service_host;
mod template_expander;

pub use config_evaluator::ConfigEvaluator;
pub use object_storage::{ObjectStorage, StorageError};
pub use service_host::ServiceHost;
pub use template_expander::{EscapePolicy, TemplateExpander};
