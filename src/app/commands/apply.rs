//! Merge evaluated PKL values into the live service description.

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::app::AppContext;
use crate::domain::namespace::parse_evaluated;
use crate::domain::{AppError, OutputFormat, build_context, namespace, splice_fields};
use crate::ports::{ConfigEvaluator, EscapePolicy, ObjectStorage, ServiceHost, TemplateExpander};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Top-level keys replaced in the host, in whitelist order.
    pub spliced: Vec<&'static str>,
}

pub fn execute<E, S, T>(
    ctx: &AppContext<E, S, T>,
    host: &mut impl ServiceHost,
) -> Result<ApplyOutcome, AppError>
where
    E: ConfigEvaluator,
    S: ObjectStorage,
    T: TemplateExpander,
{
    let config = host.service().pkl_config()?;
    let file = config.file()?;

    let raw = ctx.evaluator().evaluate(file, OutputFormat::Json)?;
    let values = namespace(&parse_evaluated(&raw)?);

    let context = build_context(host.service())?;
    debug!("Service context:\n{}", context);

    let rendered = ctx.expander().expand(&context, &values, EscapePolicy::None)?;
    let expanded = match serde_json::from_str(&rendered) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(AppError::parse_error("expanded context", "expected a JSON object")),
        Err(e) => return Err(AppError::parse_error("expanded context", e)),
    };

    let spliced = splice(host, &expanded)?;
    info!("Applied PKL configuration to {}", spliced.join(", "));

    Ok(ApplyOutcome { spliced })
}

/// Replace every whitelisted, set field of `expanded` in the host.
pub fn splice(
    host: &mut impl ServiceHost,
    expanded: &Map<String, Value>,
) -> Result<Vec<&'static str>, AppError> {
    let mut spliced = Vec::new();
    for (key, value) in splice_fields(expanded) {
        host.extend_configuration(&[key], value.clone())?;
        spliced.push(key);
    }
    Ok(spliced)
}
