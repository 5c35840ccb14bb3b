//! PKL evaluator port definition.

use crate::domain::{AppError, OutputFormat};

/// Compiles a PKL source document into a rendered document.
pub trait ConfigEvaluator {
    /// Evaluate `file` and return the rendered document in `format`.
    fn evaluate(&self, file: &str, format: OutputFormat) -> Result<Vec<u8>, AppError>;
}
