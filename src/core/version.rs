//! Dotted version comparison for feature gating.
//!
//! Versions are split on `.` and compared segment by segment. Numeric pairs
//! compare numerically, anything else compares as plain strings. The shorter
//! version is padded with `"0"` segments, so `4.0 == 4.0.0` and
//! `4.0.0.1 > 4.0.0`.
//!
//! Comparison is total: malformed input such as `asdw4.0.2` or `3.1.1.0{0.1}`
//! never errors. Callers that care whether a string segment took part can
//! check [`VersionComparison::lexical_fallback`].

use serde::Serialize;
use std::cmp::Ordering;

/// Missing trailing segments compare as this value.
const IMPLICIT_SEGMENT: &str = "0";

/// Outcome of comparing two version identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    #[serde(serialize_with = "serialize_ordering")]
    pub ordering: Ordering,
    /// At least one segment pair was not numeric on both sides.
    pub lexical_fallback: bool,
}

fn serialize_ordering<S: serde::Serializer>(
    ordering: &Ordering,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(ordering_label(*ordering))
}

pub fn ordering_label(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

/// Compare two version identifiers.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    compare_versions_detailed(a, b).ordering
}

/// Compare two version identifiers, reporting whether string comparison was needed.
///
/// The scan stops at the first differing pair, so `lexical_fallback` only
/// reflects the segments that were actually inspected.
pub fn compare_versions_detailed(a: &str, b: &str) -> VersionComparison {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();
    let len = a_parts.len().max(b_parts.len());
    let mut lexical_fallback = false;

    for idx in 0..len {
        let a_seg = a_parts.get(idx).copied().unwrap_or(IMPLICIT_SEGMENT);
        let b_seg = b_parts.get(idx).copied().unwrap_or(IMPLICIT_SEGMENT);

        let ordering = if is_numeric(a_seg) && is_numeric(b_seg) {
            compare_numeric(a_seg, b_seg)
        } else {
            lexical_fallback = true;
            a_seg.cmp(b_seg)
        };

        if ordering != Ordering::Equal {
            return VersionComparison {
                ordering,
                lexical_fallback,
            };
        }
    }

    VersionComparison {
        ordering: Ordering::Equal,
        lexical_fallback,
    }
}

/// Return the larger of two versions.
///
/// An absent or empty version is smaller than any real one. Equal versions
/// return `a`.
pub fn extract_larger_version<'a>(a: Option<&'a str>, b: Option<&'a str>) -> Option<&'a str> {
    let a = a.filter(|v| !v.is_empty());
    let b = b.filter(|v| !v.is_empty());

    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (Some(a), Some(b)) => match compare_versions(a, b) {
            Ordering::Less => Some(b),
            Ordering::Equal | Ordering::Greater => Some(a),
        },
    }
}

/// Whether `a` is at least `b`.
pub fn greater_or_equals_version(a: &str, b: &str) -> bool {
    compare_versions(a, b) != Ordering::Less
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

// Digit strings of any length: strip leading zeros, then longer is larger.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
