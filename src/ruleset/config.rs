//! RuleSet ordering configuration.

use serde::Deserialize;

/// Final ordering of a built rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Order of first occurrence
    #[default]
    Insertion,
    /// Lexicographic order of the full `TYPE,CONTENT` line
    Sorted,
}

impl Ordering {
    /// Get the internal name of this ordering.
    pub fn name(&self) -> &'static str {
        match self {
            Ordering::Insertion => "insertion",
            Ordering::Sorted => "sorted",
        }
    }

    /// Parse an ordering from its name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "insertion" | "insert" => Some(Ordering::Insertion),
            "sorted" | "sort" => Some(Ordering::Sorted),
            _ => None,
        }
    }
}
