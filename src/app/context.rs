use crate::ports::{ConfigEvaluator, ObjectStorage, TemplateExpander};

/// Application context holding dependencies for command execution.
pub struct AppContext<E: ConfigEvaluator, S: ObjectStorage, T: TemplateExpander> {
    evaluator: E,
    storage: S,
    expander: T,
}

impl<E: ConfigEvaluator, S: ObjectStorage, T: TemplateExpander> AppContext<E, S, T> {
    /// Create a new application context.
    pub fn new(evaluator: E, storage: S, expander: T) -> Self {
        Self { evaluator, storage, expander }
    }

    /// Get a reference to the PKL evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Get a reference to the object storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get a reference to the placeholder expander.
    pub fn expander(&self) -> &T {
        &self.expander
    }
}
