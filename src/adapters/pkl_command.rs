use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::domain::{AppError, OutputFormat};
use crate::ports::ConfigEvaluator;

/// Default executable name for the PKL CLI.
pub const DEFAULT_PKL_BIN: &str = "pkl";

/// Evaluates PKL documents by running `pkl eval`.
#[derive(Debug, Clone)]
pub struct PklCommandEvaluator {
    binary: PathBuf,
    cwd: Option<PathBuf>,
}

impl PklCommandEvaluator {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into(), cwd: None }
    }

    /// Run the evaluator in `cwd` instead of the process working directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.binary.display(), args.join(" "))
    }
}

impl Default for PklCommandEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_PKL_BIN)
    }
}

impl ConfigEvaluator for PklCommandEvaluator {
    fn evaluate(&self, file: &str, format: OutputFormat) -> Result<Vec<u8>, AppError> {
        let args = ["eval", "-f", format.as_str(), file];
        let command_line = self.command_line(&args);

        info!("Building PKL configuration");
        debug!("Executing command: {}", command_line);

        let mut command = Command::new(&self.binary);
        command.args(args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().map_err(|e| AppError::Evaluation {
            command: command_line.clone(),
            details: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::Evaluation {
                command: command_line,
                details: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(output.stdout)
    }
}
