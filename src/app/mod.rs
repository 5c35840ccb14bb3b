pub mod cli;
pub mod commands;
mod context;
pub mod logging;
pub mod plugin;

pub use context::AppContext;
pub use plugin::{HookOutcome, PklPlugin, PluginManifest, PluginOptions};
