//! Placeholder expansion port definition.

use serde_json::{Map, Value};

use crate::domain::AppError;

/// How substituted values are escaped in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapePolicy {
    /// Insert values verbatim.
    #[default]
    None,
    /// HTML-escape values.
    Html,
}

/// Substitutes `{{key}}` placeholders with values from a mapping.
pub trait TemplateExpander {
    /// Expand every placeholder whose key is present in `values`.
    ///
    /// Placeholders without a matching key are left in the output unchanged.
    fn expand(
        &self,
        template: &str,
        values: &Map<String, Value>,
        escape: EscapePolicy,
    ) -> Result<String, AppError>;
}
