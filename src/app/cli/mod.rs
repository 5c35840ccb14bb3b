//! CLI Adapter.

mod pkl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::filesystem_storage::DEFAULT_STORAGE_DIR;
use crate::adapters::pkl_command::DEFAULT_PKL_BIN;
use crate::adapters::{
    FileServiceHost, FilesystemObjectStorage, MemoryServiceHost, MinijinjaTemplateExpander,
    PklCommandEvaluator,
};
use crate::app::commands::remove::RemoveOutcome;
use crate::app::commands::upload::UploadOutcome;
use crate::app::{HookOutcome, PklPlugin, PluginOptions, logging};
use crate::domain::AppError;
use crate::ports::ServiceHost;

type CliPlugin = PklPlugin<PklCommandEvaluator, FilesystemObjectStorage, MinijinjaTemplateExpander>;

#[derive(Parser)]
#[command(name = "sls-pkl")]
#[command(version)]
#[command(
    about = "Apply PKL configuration to a Serverless service description",
    long_about = None
)]
struct Cli {
    /// Service description file (YAML, or JSON by extension)
    #[arg(short, long, global = true, default_value = "serverless.yml")]
    service: PathBuf,
    /// PKL executable
    #[arg(long, global = true, default_value = DEFAULT_PKL_BIN)]
    pkl_bin: PathBuf,
    /// Directory standing in for the object storage account
    #[arg(long, global = true, default_value = DEFAULT_STORAGE_DIR)]
    storage_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge PKL values into the service description and print the result
    #[clap(visible_alias = "a")]
    Apply {
        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage PKL configuration
    Pkl {
        #[command(subcommand)]
        command: pkl::PklCommands,
    },
    /// Fire a host lifecycle event
    Hook {
        /// Event name, e.g. before:package:createDeploymentArtifacts
        event: String,
    },
    /// Print the commands and hooks registered with the host
    Describe,
}

pub fn run() {
    logging::init();
    let cli = Cli::parse();

    let result: Result<(), AppError> = match &cli.command {
        Commands::Apply { output } => run_apply(&cli, output.as_deref()),
        Commands::Pkl { command } => pkl::run_pkl(&cli, command),
        Commands::Hook { event } => run_hook(&cli, event),
        Commands::Describe => run_describe(&cli),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load the service and construct the plugin the way the host would.
fn load_plugin(
    cli: &Cli,
    options: PluginOptions,
) -> Result<(CliPlugin, FileServiceHost), AppError> {
    let mut host = FileServiceHost::load(&cli.service)?;
    let ctx = crate::default_context(&cli.pkl_bin, &cli.storage_dir);
    let plugin = PklPlugin::new(ctx, &mut host, options)?;
    Ok((plugin, host))
}

fn run_apply(cli: &Cli, output: Option<&std::path::Path>) -> Result<(), AppError> {
    let (_, host) = load_plugin(cli, PluginOptions::default())?;
    match output {
        Some(path) => {
            host.save_to(path)?;
            println!("✅ Wrote {}", path.display());
        }
        None => print!("{}", host.render()?),
    }
    Ok(())
}

fn run_hook(cli: &Cli, event: &str) -> Result<(), AppError> {
    let (plugin, host) = load_plugin(cli, PluginOptions::default())?;
    let outcome = plugin.run_hook(event, host.service())?;
    report(&outcome);
    Ok(())
}

fn run_describe(cli: &Cli) -> Result<(), AppError> {
    let mut host = MemoryServiceHost::default();
    let ctx = crate::default_context(&cli.pkl_bin, &cli.storage_dir);
    let plugin = PklPlugin::new(ctx, &mut host, PluginOptions { test: true })?;
    let manifest = serde_json::to_string_pretty(&plugin.manifest())
        .map_err(|e| AppError::parse_error("plugin manifest", e))?;
    println!("{}", manifest);
    Ok(())
}

fn report(outcome: &HookOutcome) {
    match outcome {
        HookOutcome::Upload(UploadOutcome::Uploaded { object, .. }) => {
            println!("✅ Uploaded {} to bucket {}", object.key, object.bucket);
        }
        HookOutcome::Remove(RemoveOutcome::Removed { object }) => {
            println!("✅ Removed {} from bucket {}", object.key, object.bucket);
        }
        HookOutcome::Upload(UploadOutcome::Skipped)
        | HookOutcome::Remove(RemoveOutcome::Skipped)
        | HookOutcome::Remove(RemoveOutcome::BucketMissing { .. }) => {}
    }
}
