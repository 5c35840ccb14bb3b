//! Selection of expanded fields to write back into the host.

use serde_json::{Map, Value};

use super::service::{CONTEXT_FIELDS, is_truthy};

/// Whitelisted fields that are set in the expanded document, in whitelist order.
///
/// Keys outside [`CONTEXT_FIELDS`] are never returned, so a splice can only
/// replace fields the context was built from.
pub fn splice_fields(expanded: &Map<String, Value>) -> Vec<(&'static str, &Value)> {
    CONTEXT_FIELDS
        .iter()
        .filter_map(|&key| expanded.get(key).filter(|v| is_truthy(v)).map(|v| (key, v)))
        .collect()
}
