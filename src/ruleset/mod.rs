//! Deduplicated rule line collection.

mod config;

pub use config::Ordering;

use ahash::AHashSet;

use crate::rule::RuleLine;
use crate::RuleType;

/// Accumulates rule lines, dropping exact duplicates on insert.
///
/// The first occurrence of a line fixes its position.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    seen: AHashSet<String>,
    lines: Vec<RuleLine>,
}

impl RuleSetBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line. Returns `false` if the same line was already present.
    pub fn insert(&mut self, line: RuleLine) -> bool {
        if !self.seen.insert(line.to_string()) {
            return false;
        }
        self.lines.push(line);
        true
    }

    /// Number of unique lines so far.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Freeze into a rule set with the given ordering.
    pub fn build(self, ordering: Ordering) -> RuleSet {
        let mut lines = self.lines;
        if ordering == Ordering::Sorted {
            lines.sort_by_cached_key(|line| line.to_string());
        }
        RuleSet { lines, ordering }
    }
}

impl Extend<RuleLine> for RuleSetBuilder {
    fn extend<I: IntoIterator<Item = RuleLine>>(&mut self, iter: I) {
        for line in iter {
            self.insert(line);
        }
    }
}

/// An immutable, duplicate-free, ordered list of rule lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    lines: Vec<RuleLine>,
    ordering: Ordering,
}

impl RuleSet {
    /// Build a rule set from lines in one step.
    pub fn from_lines(lines: impl IntoIterator<Item = RuleLine>, ordering: Ordering) -> Self {
        let mut builder = RuleSetBuilder::new();
        builder.extend(lines);
        builder.build(ordering)
    }

    /// An empty rule set.
    pub fn empty() -> Self {
        RuleSetBuilder::new().build(Ordering::default())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleLine> {
        self.lines.iter()
    }

    pub fn lines(&self) -> &[RuleLine] {
        &self.lines
    }

    /// Check whether a `TYPE,CONTENT` line is present.
    pub fn contains(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l.to_string() == line)
    }

    /// Number of rules of the given type.
    pub fn count_by_type(&self, rule_type: RuleType) -> usize {
        self.lines
            .iter()
            .filter(|l| l.rule_type() == rule_type)
            .count()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RuleLine;
    type IntoIter = std::slice::Iter<'a, RuleLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
