//! Name normalization and fuzzy matching for hints and leaf items

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Cosmetic suffixes, stripped once each and in this order
static COSMETIC_SUFFIXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s+-\s+EDITED$",
        r"(?i)\s+EDITED$",
        r"\s*(?:\d{4}-\d{2}-\d{2}(?:[ T]\d{2}:\d{2}(?::\d{2})?)?|\d{1,2}/\d{1,2}/\d{2,4})$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("cosmetic suffix pattern is valid"))
    .collect()
});

/// How a name matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Equal after normalization
    Exact,
    /// One contains the other after normalization
    Contains,
}

/// Trim, strip cosmetic suffixes, lowercase
pub fn normalize_name(name: &str) -> String {
    let mut current = name.trim().to_string();
    for pattern in COSMETIC_SUFFIXES.iter() {
        let stripped = pattern.replace(&current, "").trim().to_string();
        current = stripped;
    }
    current.to_lowercase()
}

fn compare(a: &str, b: &str) -> Option<MatchKind> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if a == b {
        Some(MatchKind::Exact)
    } else if a.contains(b) || b.contains(a) {
        Some(MatchKind::Contains)
    } else {
        None
    }
}

/// Three-way case-insensitive match of a branch hint against a child name
pub fn hint_matches(hint: &str, child: &str) -> Option<MatchKind> {
    compare(&hint.trim().to_lowercase(), &child.trim().to_lowercase())
}

/// Match a leaf item against the target name
pub fn leaf_match(target: &str, candidate: &str) -> Option<MatchKind> {
    compare(&normalize_name(target), &normalize_name(candidate))
}

/// Same text once trimmed, ignoring case, cosmetic suffixes included.
///
/// Breaks ties between items that only differ by a stripped date stamp.
pub fn is_verbatim(target: &str, candidate: &str) -> bool {
    target.trim().to_lowercase() == candidate.trim().to_lowercase()
}
