//! Environment merging.

use std::collections::HashMap;

/// Merge caller-supplied variables over the inherited process
/// environment. Caller entries win on collision.
///
/// Deterministic and idempotent for identical inputs.
pub fn merge_environment(overrides: &HashMap<String, String>) -> HashMap<String, String> {
    let mut merged: HashMap<String, String> = std::env::vars().collect();

    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }

    merged
}
