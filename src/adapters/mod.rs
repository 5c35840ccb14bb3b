pub mod filesystem_storage;
pub mod memory_service_host;
pub mod memory_storage;
pub mod pkl_command;
pub mod service_file;
pub mod template;

pub use filesystem_storage::FilesystemObjectStorage;
pub use memory_service_host::MemoryServiceHost;
pub use memory_storage::{MemoryObjectStorage, StorageCall};
pub use pkl_command::PklCommandEvaluator;
pub use service_file::FileServiceHost;
pub use template::MinijinjaTemplateExpander;
