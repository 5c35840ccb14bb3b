use minijinja::{AutoEscape, Environment, Value as TemplateValue, context};
use serde_json::{Map, Value};

use crate::domain::AppError;
use crate::ports::{EscapePolicy, TemplateExpander};

/// Placeholder expander rendering through Minijinja.
///
/// Placeholders are resolved by a scanner before anything reaches Minijinja,
/// so unresolved `{{...}}` and any other template syntax in the service
/// description is emitted untouched. Minijinja only joins the resolved pieces
/// and applies the escape policy to values from `{{key}}` tags; `{{{key}}}`
/// and `{{&key}}` are always inserted unescaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinijinjaTemplateExpander;

impl MinijinjaTemplateExpander {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateExpander for MinijinjaTemplateExpander {
    fn expand(
        &self,
        template: &str,
        values: &Map<String, Value>,
        escape: EscapePolicy,
    ) -> Result<String, AppError> {
        let slots = split_placeholders(template, values)?;
        if slots.is_empty() {
            return Ok(String::new());
        }

        let source: String =
            (0..slots.len()).map(|i| format!("{{{{ slots[{i}] }}}}")).collect();

        let mut env = Environment::new();
        let auto_escape = match escape {
            EscapePolicy::None => AutoEscape::None,
            EscapePolicy::Html => AutoEscape::Html,
        };
        env.set_auto_escape_callback(move |_| auto_escape.clone());

        env.render_str(&source, context! { slots => TemplateValue::from(slots) })
            .map_err(|err| AppError::TemplateRender(err.to_string()))
    }
}

/// A placeholder tag resolved against the value map.
struct Tag<'a> {
    value: &'a Value,
    unescaped: bool,
    len: usize,
}

/// Break `template` into literal runs (marked safe) and placeholder values.
fn split_placeholders(
    template: &str,
    values: &Map<String, Value>,
) -> Result<Vec<TemplateValue>, AppError> {
    let mut slots = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        match resolve_tag(&rest[open..], values) {
            Some(tag) => {
                literal.push_str(&rest[..open]);
                if !literal.is_empty() {
                    slots.push(TemplateValue::from_safe_string(std::mem::take(&mut literal)));
                }
                let rendered = render_value(tag.value)?;
                slots.push(if tag.unescaped {
                    TemplateValue::from_safe_string(rendered)
                } else {
                    TemplateValue::from(rendered)
                });
                rest = &rest[open + tag.len..];
            }
            None => {
                // Not ours: keep the first brace and rescan from the next one.
                literal.push_str(&rest[..open + 1]);
                rest = &rest[open + 1..];
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        slots.push(TemplateValue::from_safe_string(literal));
    }
    Ok(slots)
}

/// Match `{{{key}}}`, `{{&key}}` or `{{key}}` at the start of `source`.
fn resolve_tag<'a>(source: &str, values: &'a Map<String, Value>) -> Option<Tag<'a>> {
    if let Some(inner) = source.strip_prefix("{{{") {
        let triple = inner
            .find("}}}")
            .and_then(|close| lookup(values, inner[..close].trim()).map(|value| (value, close)));
        if let Some((value, close)) = triple {
            return Some(Tag { value, unescaped: true, len: close + 6 });
        }
    }

    let inner = source.strip_prefix("{{")?;
    let close = inner.find("}}")?;
    let body = inner[..close].trim();
    let (key, unescaped) = match body.strip_prefix('&') {
        Some(key) => (key.trim_start(), true),
        None => (body, false),
    };
    lookup(values, key).map(|value| Tag { value, unescaped, len: close + 4 })
}

/// Exact key first, then a dotted path through nested objects and arrays.
fn lookup<'a>(values: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    if let Some(value) = values.get(key) {
        return Some(value);
    }

    let mut segments = key.split('.');
    let root = values.get(segments.next()?)?;
    segments.try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn render_value(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        other => serde_json::to_string(other).map_err(|e| AppError::TemplateRender(e.to_string())),
    }
}
