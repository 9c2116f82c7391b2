use crate::model::ErrorObj;
use std::collections::BTreeMap;

const LABEL_META_KEYS: [&str; 3] = ["realm", "resource", "action"];

/// Low-cardinality fields suitable for structured log events.
pub fn labels(err: &ErrorObj) -> BTreeMap<&'static str, String> {
    let mut map = BTreeMap::new();
    map.insert("code", err.code.0.to_string());
    map.insert("kind", err.kind.as_str().to_string());
    map.insert("retryable", err.retryable.as_str().to_string());
    map.insert("severity", err.severity.as_str().to_string());

    for key in LABEL_META_KEYS {
        if let Some(value) = err.meta.get(key) {
            let rendered = match value.as_str() {
                Some(s) => s.to_string(),
                None => value.to_string(),
            };
            map.insert(key, rendered);
        }
    }

    map
}
