//! sls-pkl: evaluate PKL configuration and splice it into a Serverless service description.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use adapters::{
    FileServiceHost, FilesystemObjectStorage, MemoryObjectStorage, MinijinjaTemplateExpander,
    PklCommandEvaluator,
};
use app::AppContext;

pub use app::commands::apply::ApplyOutcome;
pub use app::commands::remove::RemoveOutcome;
pub use app::commands::upload::UploadOutcome;
pub use app::{HookOutcome, PklPlugin, PluginManifest, PluginOptions};
pub use domain::{AppError, OutputFormat, PklConfig, ServiceDescription, UploadConfig};
pub use ports::{ConfigEvaluator, EscapePolicy, ObjectStorage, ServiceHost, TemplateExpander};

/// Context wired with the `pkl` binary, local directory storage and Minijinja expansion.
pub fn default_context(
    pkl_bin: &Path,
    storage_dir: &Path,
) -> AppContext<PklCommandEvaluator, FilesystemObjectStorage, MinijinjaTemplateExpander> {
    AppContext::new(
        PklCommandEvaluator::new(pkl_bin),
        FilesystemObjectStorage::new(storage_dir),
        MinijinjaTemplateExpander::new(),
    )
}

/// Load the service file at `service_path` and merge PKL values into it.
///
/// Applying never reaches object storage, so the context carries an empty
/// in-memory store.
pub fn apply_file(service_path: &Path, pkl_bin: &Path) -> Result<FileServiceHost, AppError> {
    let mut host = FileServiceHost::load(service_path)?;
    let ctx = AppContext::new(
        PklCommandEvaluator::new(pkl_bin),
        MemoryObjectStorage::new(),
        MinijinjaTemplateExpander::new(),
    );
    app::commands::apply::execute(&ctx, &mut host)?;
    Ok(host)
}
