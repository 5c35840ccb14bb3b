//! `pkl` command group.

use clap::Subcommand;

use super::{Cli, load_plugin, report};
use crate::app::PluginOptions;
use crate::domain::AppError;
use crate::domain::lifecycle::PKL_UPLOAD_EVENT;
use crate::ports::ServiceHost;

#[derive(Subcommand)]
pub(super) enum PklCommands {
    /// Upload PKL configuration to S3 bucket
    Upload,
}

pub(super) fn run_pkl(cli: &Cli, command: &PklCommands) -> Result<(), AppError> {
    match command {
        PklCommands::Upload => {
            let (plugin, host) = load_plugin(cli, PluginOptions::default())?;
            let outcome = plugin.run_hook(PKL_UPLOAD_EVENT, host.service())?;
            report(&outcome);
            Ok(())
        }
    }
}
