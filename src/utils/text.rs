//! List splitting and placeholder parsing for configuration values.

use regex::Regex;
use std::sync::LazyLock;

static PROPERTY_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\$\{\s*([^}\s]+)\s*\}\s*$").expect("property placeholder pattern is valid")
});

/// Split each entry at its last `:`.
///
/// Entries without a colon map to `(entry, entry)`, so `"8080"` reads as
/// `8080:8080`.
pub fn split_on_last_colon<S: AsRef<str>>(items: &[S]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            match item.rsplit_once(':') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (item.to_string(), item.to_string()),
            }
        })
        .collect()
}

/// Trim entries and drop absent or blank ones.
pub fn remove_empty_entries(items: &[Option<&str>]) -> Vec<String> {
    items
        .iter()
        .flatten()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split every entry on commas, trimming and dropping blanks.
pub fn split_at_commas_and_trim(items: &[Option<&str>]) -> Vec<String> {
    items
        .iter()
        .flatten()
        .flat_map(|item| item.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Name inside a `${name}` placeholder, or None when the value is not one.
pub fn extract_property_name(value: &str) -> Option<&str> {
    PROPERTY_PLACEHOLDER
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_last_colon() {
        let result = split_on_last_colon(&["element1:element2"]);
        assert_eq!(result, vec![("element1".to_string(), "element2".to_string())]);
    }

    #[test]
    fn split_keeps_earlier_colons_in_key() {
        let result = split_on_last_colon(&["0.0.0.0:8080:80".to_string()]);
        assert_eq!(result, vec![("0.0.0.0:8080".to_string(), "80".to_string())]);
    }

    #[test]
    fn split_without_colon_duplicates_entry() {
        let result = split_on_last_colon(&["8080"]);
        assert_eq!(result, vec![("8080".to_string(), "8080".to_string())]);
    }

    #[test]
    fn split_of_empty_list_is_empty() {
        let items: Vec<String> = Vec::new();
        assert!(split_on_last_colon(&items).is_empty());
    }

    #[test]
    fn removes_empty_entries() {
        let result = remove_empty_entries(&[Some(" set "), Some(" set2  "), Some("")]);
        assert_eq!(result, vec!["set", "set2"]);
    }

    #[test]
    fn removes_absent_entries() {
        assert!(remove_empty_entries(&[None]).is_empty());
    }

    #[test]
    fn splits_at_commas_and_trims() {
        let result = split_at_commas_and_trim(&[Some("hello, world"), Some(" a ,,b ")]);
        assert_eq!(result, vec!["hello", "world", "a", "b"]);
    }

    #[test]
    fn split_at_commas_skips_absent() {
        assert!(split_at_commas_and_trim(&[None]).is_empty());
    }

    #[test]
    fn extracts_property_name() {
        assert_eq!(
            extract_property_name("${project.baseDir}"),
            Some("project.baseDir")
        );
        assert_eq!(extract_property_name(" ${ docker.host } "), Some("docker.host"));
    }

    #[test]
    fn non_placeholders_have_no_property_name() {
        assert_eq!(extract_property_name("roject.notbaseDi"), None);
        assert_eq!(extract_property_name("${}"), None);
        assert_eq!(extract_property_name("prefix-${a}"), None);
    }
}
