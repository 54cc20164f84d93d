//! Prefix-scoped views over flat `key=value` build properties.
//!
//! Given `docker.ports.1=80` and `docker.ports.2=443`, the prefix
//! `docker.ports` yields the list `["80", "443"]` or the map
//! `{"1": "80", "2": "443"}`. The `_combine` key is a merge directive, not a
//! value, and is always skipped.

use std::cmp::Ordering;
use std::collections::BTreeMap;

const COMBINE_KEY: &str = "_combine";

fn scoped<'a>(
    prefix: &'a str,
    properties: &'a BTreeMap<String, String>,
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    properties.iter().filter_map(move |(key, value)| {
        let rest = key.strip_prefix(prefix)?.strip_prefix('.')?;
        if rest.is_empty() || rest == COMBINE_KEY {
            return None;
        }
        Some((rest, value.as_str()))
    })
}

/// Properties under `prefix.` keyed by the remainder of their name.
pub fn extract_from_properties_as_map(
    prefix: &str,
    properties: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    scoped(prefix, properties)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Values under `prefix.`, numeric suffixes first in numeric order, then the
/// remaining keys in name order.
pub fn extract_from_properties_as_list(
    prefix: &str,
    properties: &BTreeMap<String, String>,
) -> Vec<String> {
    let mut entries: Vec<(&str, &str)> = scoped(prefix, properties).collect();
    entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    entries
        .into_iter()
        .map(|(_, value)| value.to_string())
        .collect()
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
