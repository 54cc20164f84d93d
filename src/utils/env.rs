//! Environment variable / build property lookup.

use std::collections::BTreeMap;

/// Resolve `name` from the environment, then `properties`, then `default`.
pub fn env_var_or_property(
    name: &str,
    properties: &BTreeMap<String, String>,
    default: &str,
) -> String {
    lookup_with(name, properties, default, |key| std::env::var(key).ok())
}

/// Same resolution order with an injected environment.
pub fn lookup_with<F>(
    name: &str,
    properties: &BTreeMap<String, String>,
    default: &str,
    env: F,
) -> String
where
    F: Fn(&str) -> Option<String>,
{
    env(name)
        .or_else(|| properties.get(name).cloned())
        .unwrap_or_else(|| default.to_string())
}
