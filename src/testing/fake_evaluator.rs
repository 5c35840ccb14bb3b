use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{AppError, OutputFormat};
use crate::ports::ConfigEvaluator;

/// Evaluator returning canned output per format and recording each call.
#[derive(Default)]
pub struct FakeEvaluator {
    pub outputs: Mutex<HashMap<OutputFormat, Vec<u8>>>,
    pub calls: Mutex<Vec<(String, OutputFormat)>>,
    pub failure: Mutex<Option<String>>,
}

impl FakeEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(json: &str) -> Self {
        let fake = Self::new();
        fake.set_output(OutputFormat::Json, json);
        fake
    }

    pub fn set_output(&self, format: OutputFormat, body: &str) {
        self.outputs.lock().unwrap().insert(format, body.as_bytes().to_vec());
    }

    pub fn fail_with(&self, details: &str) {
        *self.failure.lock().unwrap() = Some(details.to_string());
    }

    pub fn calls(&self) -> Vec<(String, OutputFormat)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ConfigEvaluator for FakeEvaluator {
    fn evaluate(&self, file: &str, format: OutputFormat) -> Result<Vec<u8>, AppError> {
        self.calls.lock().unwrap().push((file.to_string(), format));
        if let Some(details) = self.failure.lock().unwrap().clone() {
            return Err(AppError::Evaluation {
                command: format!("pkl eval -f {format} {file}"),
                details,
            });
        }
        Ok(self.outputs.lock().unwrap().get(&format).cloned().unwrap_or_else(|| b"{}".to_vec()))
    }
}
