//! Schema-driven conversion.
//!
//! Trusts a fixed document shape instead of walking arbitrary JSON:
//!
//! ```json
//! { "rules": [ { "domain": [...], "domain_suffix": [...], "domain_keyword": [...] } ] }
//! ```
//!
//! Each field may hold a single string or an array of strings. Domains are
//! cleaned (case, scheme, path, port, wildcard prefix) but not classified.

use crate::classifier::LineResult;
use crate::raw::{RawObject, RawValue};
use crate::rule::RuleLine;
use crate::RuleType;

/// Recognized rule fields and the tag each one maps to.
pub const SCHEMA_FIELDS: &[(&str, RuleType)] = &[
    ("domain", RuleType::DomainSuffix),
    ("domain_suffix", RuleType::DomainSuffix),
    ("domain_keyword", RuleType::DomainKeyword),
];

/// Convert a schema document into rule lines.
///
/// Returns `None` when `rules` is missing or not an array.
pub fn schema_lines(document: &RawValue) -> Option<Vec<LineResult>> {
    let rules = match document.as_object().and_then(|obj| obj.get("rules")) {
        Some(RawValue::Array(rules)) => rules,
        _ => return None,
    };

    let mut out = Vec::new();
    for rule in rules {
        match rule.as_object() {
            Some(obj) => out.extend(schema_rule_lines(obj)),
            None => log::debug!("Skipping non-object schema rule: {}", rule),
        }
    }
    Some(out)
}

/// Convert one `rules[]` entry.
pub fn schema_rule_lines(rule: &RawObject) -> Vec<LineResult> {
    let mut out = Vec::new();
    for (field, rule_type) in SCHEMA_FIELDS {
        let Some(value) = rule.get(field) else {
            continue;
        };
        for entry in field_entries(value) {
            let cleaned = match rule_type {
                RuleType::DomainKeyword => clean_keyword(&entry),
                _ => clean_domain(&entry),
            };
            if let Some(content) = cleaned {
                out.push(RuleLine::new(*rule_type, content));
            }
        }
    }
    out
}

/// Strings held by a field: a single primitive or an array of them.
fn field_entries(value: &RawValue) -> Vec<String> {
    match value {
        RawValue::Array(items) => items.iter().filter_map(RawValue::as_text).collect(),
        other => other.as_text().into_iter().collect(),
    }
}

/// Normalize a domain-ish string to a bare lower-case host name.
///
/// Strips scheme, userinfo, path, query, fragment, port, leading `*.`/`.`
/// and trailing dots. Returns `None` if nothing is left.
pub fn clean_domain(input: &str) -> Option<String> {
    let lower = input.trim().to_lowercase();
    let mut domain = lower.as_str();

    if let Some(idx) = domain.find("://") {
        domain = &domain[idx + 3..];
    }
    if let Some(idx) = domain.find(['/', '?', '#']) {
        domain = &domain[..idx];
    }
    if let Some(idx) = domain.rfind('@') {
        domain = &domain[idx + 1..];
    }
    if let Some(idx) = domain.rfind(':') {
        let port = &domain[idx + 1..];
        if port.chars().all(|c| c.is_ascii_digit()) {
            domain = &domain[..idx];
        }
    }

    let domain = domain
        .trim_start_matches(['*', '.'])
        .trim_end_matches('.')
        .trim();

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

/// Normalize a keyword: trimmed and lower-cased.
pub fn clean_keyword(input: &str) -> Option<String> {
    let keyword = input.trim().to_lowercase();
    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}
