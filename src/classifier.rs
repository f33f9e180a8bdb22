//! Rule classification and content normalization.
//!
//! Turns rule candidates into `TYPE,CONTENT` lines. Strings are classified
//! by pattern heuristics (adblock anchors, IPv4 forms, wildcard patterns,
//! domain shape). Objects resolve a content field and an optional type hint
//! first, then fall back to the string heuristics.
//!
//! Every emitted line is a `Result` so a single malformed entry can be
//! skipped by the caller without aborting the conversion.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RuleLineError;
use crate::extractor::RuleCandidate;
use crate::raw::{RawObject, RawValue};
use crate::rule::RuleLine;
use crate::RuleType;

/// Outcome of classifying one emitted rule.
pub type LineResult = std::result::Result<RuleLine, RuleLineError>;

/// Content keys, in priority order. The first key present wins, even when
/// its value is null or empty.
pub const CONTENT_KEYS: &[&str] = &["payload", "value", "content", "pattern", "domain", "host", "rule"];

/// Second probe used when none of [`CONTENT_KEYS`] is present.
pub const CONTENT_FALLBACK_KEYS: &[&str] = &["domain", "host", "pattern", "rule"];

/// Type hint keys, in priority order.
pub const TYPE_KEYS: &[&str] = &["type", "rule_type", "kind"];

/// Characters that mark a string as a wildcard/regex pattern.
const PATTERN_CHARS: &[char] = &[
    '*', '^', '/', '?', '$', '+', '(', ')', '[', ']', '{', '}', '|',
];

/// Adblock domain anchor: `||example.com^` (trailing `^` optional).
static ADBLOCK_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|\|([A-Za-z0-9._-]+)\^?$").unwrap());

/// IPv4 address with optional prefix length (ASCII digits only).
static IPV4_CIDR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(?:\.[0-9]{1,3}){3}(?:/[0-9]{1,2})?$").unwrap());

/// IPv4 range: `a.b.c.d-e.f.g.h`.
static IPV4_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(?:\.[0-9]{1,3}){3}-[0-9]{1,3}(?:\.[0-9]{1,3}){3}$").unwrap());

/// One or more `label.` segments followed by an alphabetic TLD.
static DOMAIN_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,63}$").unwrap());

/// Regex metacharacters that need a backslash to match literally.
static REGEX_META: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.*+?^${}()|\[\]\\]").unwrap());

/// Escape regex metacharacters so the text matches literally.
pub fn escape_regex(s: &str) -> String {
    REGEX_META.replace_all(s, r"\$0").into_owned()
}

/// Classifier options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Apply an object's type hint to each element of array-valued content.
    ///
    /// Off by default: array elements are classified from scratch.
    pub inherit_type_hints: bool,
}

/// Rule classifier.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    options: ClassifierOptions,
}

impl Classifier {
    /// Create a classifier with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with the given options.
    pub fn with_options(options: ClassifierOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ClassifierOptions {
        self.options
    }

    /// Classify one candidate into zero or more rule lines.
    pub fn classify(&self, candidate: &RuleCandidate<'_>) -> Vec<LineResult> {
        match candidate {
            RuleCandidate::Text(s) => self.classify_str(s),
            RuleCandidate::Object(obj) => self.classify_object(obj),
        }
    }

    /// Classify a string candidate.
    ///
    /// Yields exactly one line unless the string is empty or a comment.
    pub fn classify_str(&self, s: &str) -> Vec<LineResult> {
        classify_text(s).into_iter().collect()
    }

    /// Classify an object candidate.
    pub fn classify_object(&self, obj: &RawObject) -> Vec<LineResult> {
        let mut out = Vec::new();
        self.classify_object_into(obj, &mut out);
        out
    }

    fn classify_object_into(&self, obj: &RawObject, out: &mut Vec<LineResult>) {
        let content = probe(obj, CONTENT_KEYS).or_else(|| probe(obj, CONTENT_FALLBACK_KEYS));
        let hint = probe(obj, TYPE_KEYS)
            .and_then(RawValue::as_text)
            .map(|t| t.trim().to_lowercase());

        let Some(content) = content else {
            // Last resort: keep the entry as a literal match of its JSON text.
            let dump = RawValue::Object(obj.clone()).to_json_string();
            out.push(RuleLine::new(RuleType::Regex, escape_regex(&dump)));
            return;
        };

        self.classify_content(content, hint.as_deref(), out);
    }

    /// Classify a content value. An object value is classified as a nested
    /// object candidate with its own keys and hint, not coerced to a string.
    fn classify_content(&self, value: &RawValue, hint: Option<&str>, out: &mut Vec<LineResult>) {
        match value {
            RawValue::Null => {}
            RawValue::Array(items) => {
                let inherited = hint.filter(|_| self.options.inherit_type_hints);
                for item in items {
                    self.classify_content(item, inherited, out);
                }
            }
            RawValue::Object(obj) => self.classify_object_into(obj, out),
            RawValue::Bool(_) | RawValue::Number(_) | RawValue::String(_) => {
                if let Some(text) = value.as_text() {
                    self.classify_hinted(&text, hint, out);
                }
            }
        }
    }

    fn classify_hinted(&self, s: &str, hint: Option<&str>, out: &mut Vec<LineResult>) {
        let s = s.trim();
        if s.is_empty() {
            return;
        }

        if let Some(rule_type) = hint.and_then(hinted_type) {
            out.push(RuleLine::new(rule_type, s));
            return;
        }

        out.extend(classify_text(s));
    }
}

/// Look up the first present key.
fn probe<'a>(obj: &'a RawObject, keys: &[&str]) -> Option<&'a RawValue> {
    keys.iter().find_map(|key| obj.get(key))
}

/// Map a lower-cased type hint to a rule type.
///
/// Checks run in order and the first match wins; "domain" is tested before
/// the generic ip/regex checks.
pub fn hinted_type(t: &str) -> Option<RuleType> {
    let domain = t.contains("domain");

    if (domain && t.contains("suffix")) || t == "suffix" || t == "domain-suffix" {
        return Some(RuleType::DomainSuffix);
    }
    if domain && (t.contains("keyword") || t.contains("key")) {
        return Some(RuleType::DomainKeyword);
    }
    if domain {
        return Some(RuleType::DomainSuffix);
    }
    if t.contains("ip") || t.contains("cidr") {
        return Some(RuleType::IpCidr);
    }
    if t.contains("regex") || t.contains("re") {
        return Some(RuleType::Regex);
    }
    None
}

/// Classify a string by pattern heuristics.
///
/// Returns `None` for empty strings and comment lines (`!` or `#`).
pub fn classify_text(s: &str) -> Option<LineResult> {
    let s = s.trim();
    if s.is_empty() || s.starts_with('!') || s.starts_with('#') {
        return None;
    }

    if let Some(caps) = ADBLOCK_ANCHOR.captures(s) {
        let domain = caps[1].trim_start_matches('.');
        if !domain.is_empty() {
            return Some(RuleLine::new(RuleType::DomainSuffix, domain.to_lowercase()));
        }
    }

    // IPv4 forms come before the pattern check since a CIDR contains '/'.
    if IPV4_CIDR.is_match(s) {
        return Some(RuleLine::new(RuleType::IpCidr, s));
    }
    if IPV4_RANGE.is_match(s) {
        // Anchored literal: matches the range text itself, not the addresses in it.
        return Some(RuleLine::new(RuleType::Regex, format!("^{}$", escape_regex(s))));
    }

    if s.contains(PATTERN_CHARS) {
        return Some(RuleLine::new(RuleType::Regex, wildcard_to_regex(s)));
    }

    if s.starts_with('.') {
        let rest = s.trim_start_matches('.');
        if !rest.is_empty() {
            return Some(RuleLine::new(RuleType::DomainSuffix, rest.to_lowercase()));
        }
    }

    let cleaned = s.trim_start_matches(['*', '.']);
    if DOMAIN_SHAPE.is_match(cleaned) {
        return Some(RuleLine::new(RuleType::DomainSuffix, cleaned.to_lowercase()));
    }

    Some(RuleLine::new(RuleType::Regex, escape_regex(s)))
}

/// Convert an adblock-style wildcard pattern into a regex.
fn wildcard_to_regex(s: &str) -> String {
    match s.strip_prefix("||") {
        Some(rest) => {
            let body = escape_regex(rest).replace(r"\*", ".*").replace(r"\^", "");
            format!(".*{}.*", body)
        }
        None => escape_regex(s).replace(r"\*", ".*"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(results: Vec<LineResult>) -> Vec<String> {
        results
            .into_iter()
            .map(|r| r.unwrap().to_string())
            .collect()
    }

    fn text(s: &str) -> String {
        classify_text(s).unwrap().unwrap().to_string()
    }

    fn object(json: &str) -> Vec<String> {
        let value = RawValue::parse(json).unwrap();
        lines(Classifier::new().classify_object(value.as_object().unwrap()))
    }

    // ==================== String Classification ====================

    #[test]
    fn test_empty_and_comments_yield_nothing() {
        assert!(classify_text("").is_none());
        assert!(classify_text("   ").is_none());
        assert!(classify_text("! adblock comment").is_none());
        assert!(classify_text("# hosts comment").is_none());
    }

    #[test]
    fn test_adblock_anchor() {
        assert_eq!(text("||ads.example.com^"), "DOMAIN-SUFFIX,ads.example.com");
        assert_eq!(text("||ads.example.com"), "DOMAIN-SUFFIX,ads.example.com");
        assert_eq!(text("||..ads.example.com^"), "DOMAIN-SUFFIX,ads.example.com");
        assert_eq!(text("  ||Ads.Example.COM^  "), "DOMAIN-SUFFIX,ads.example.com");
    }

    #[test]
    fn test_wildcard_pattern() {
        assert_eq!(text("*.tracker.net"), r"REGEX,.*\.tracker\.net");
        assert_eq!(text("ad?.example.com"), r"REGEX,ad\?\.example\.com");
        assert_eq!(text("example.com/ads/*"), r"REGEX,example\.com/ads/.*");
    }

    #[test]
    fn test_anchored_wildcard_pattern() {
        assert_eq!(text("||ads.*.com^"), r"REGEX,.*ads\..*\.com.*");
        assert_eq!(text("||example.com/banner^"), r"REGEX,.*example\.com/banner.*");
    }

    #[test]
    fn test_ipv4_cidr() {
        assert_eq!(text("192.168.1.0/24"), "IP-CIDR,192.168.1.0/24");
        assert_eq!(text("10.0.0.1"), "IP-CIDR,10.0.0.1");
    }

    #[test]
    fn test_ipv4_forms_require_ascii_digits() {
        assert_eq!(text("١.٢.٣.٤"), r"REGEX,١\.٢\.٣\.٤");
        assert_eq!(text("१.२.३.४"), r"REGEX,१\.२\.३\.४");
        assert_eq!(text("١٩٢.١٦٨.١.٠/٢٤"), r"REGEX,١٩٢\.١٦٨\.١\.٠/٢٤");
        assert_eq!(text("١.٢.٣.٤-١.٢.٣.٩"), r"REGEX,١\.٢\.٣\.٤-١\.٢\.٣\.٩");
    }

    /// Known limitation: a range becomes an anchored literal of the range
    /// text, not an expression matching the addresses inside it.
    #[test]
    fn test_ipv4_range_known_limitation() {
        assert_eq!(
            text("10.0.0.1-10.0.0.255"),
            r"REGEX,^10\.0\.0\.1-10\.0\.0\.255$"
        );
        let pattern = Regex::new(r"^10\.0\.0\.1-10\.0\.0\.255$").unwrap();
        assert!(!pattern.is_match("10.0.0.7"));
    }

    #[test]
    fn test_leading_dot_suffix() {
        assert_eq!(text(".example.com"), "DOMAIN-SUFFIX,example.com");
        assert_eq!(text("..Example.com"), "DOMAIN-SUFFIX,example.com");
        assert_eq!(text(".localhost"), "DOMAIN-SUFFIX,localhost");
    }

    #[test]
    fn test_plain_domain() {
        assert_eq!(text("example.com"), "DOMAIN-SUFFIX,example.com");
        assert_eq!(text("Sub-1.Example.co.uk"), "DOMAIN-SUFFIX,sub-1.example.co.uk");
    }

    #[test]
    fn test_fallback_literal_regex() {
        assert_eq!(text("localhost"), "REGEX,localhost");
        assert_eq!(text("example.com:8080"), r"REGEX,example\.com:8080");
        assert_eq!(text("..."), r"REGEX,\.\.\.");
    }

    #[test]
    fn test_every_non_comment_string_yields_a_line() {
        for s in ["a", "1", "a b", "[x]", "||^", "x.y", "@@||allow.com^", "ünïcode"] {
            let out = Classifier::new().classify_str(s);
            assert_eq!(out.len(), 1, "input {:?}", s);
        }
    }

    #[test]
    fn test_embedded_newline_is_an_error() {
        let result = classify_text("foo\nbar").unwrap();
        assert!(matches!(result, Err(RuleLineError::EmbeddedNewline(_))));
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("a.b"), r"a\.b");
        assert_eq!(escape_regex(r"(x)[y]{z}|^$+?*\"), r"\(x\)\[y\]\{z\}\|\^\$\+\?\*\\");
        assert_eq!(escape_regex("plain-text_1"), "plain-text_1");
    }

    // ==================== Object Classification ====================

    #[test]
    fn test_object_type_hint_keyword() {
        assert_eq!(
            object(r#"{"type":"domain_keyword","value":"adserv"}"#),
            vec!["DOMAIN-KEYWORD,adserv"]
        );
    }

    #[test]
    fn test_object_without_content_dumps_json() {
        assert_eq!(
            object(r#"{"unexpectedKey": 123}"#),
            vec![r#"REGEX,\{"unexpectedKey":123\}"#]
        );
    }

    #[test]
    fn test_object_type_only_dumps_json() {
        assert_eq!(
            object(r#"{"type": "domain"}"#),
            vec![r#"REGEX,\{"type":"domain"\}"#]
        );
    }

    #[test]
    fn test_content_key_priority() {
        assert_eq!(
            object(r#"{"domain": "b.com", "payload": "a.com"}"#),
            vec!["DOMAIN-SUFFIX,a.com"]
        );
        assert_eq!(
            object(r#"{"rule": "c.com", "host": "b.com"}"#),
            vec!["DOMAIN-SUFFIX,b.com"]
        );
    }

    #[test]
    fn test_present_empty_content_short_circuits() {
        assert!(object(r#"{"payload": "", "domain": "a.com"}"#).is_empty());
        assert!(object(r#"{"value": null, "domain": "a.com"}"#).is_empty());
    }

    #[test]
    fn test_array_content_is_classified_per_element() {
        assert_eq!(
            object(r#"{"domain": ["a.com", ".b.net", "1.2.3.0/24", ""]}"#),
            vec!["DOMAIN-SUFFIX,a.com", "DOMAIN-SUFFIX,b.net", "IP-CIDR,1.2.3.0/24"]
        );
    }

    #[test]
    fn test_type_hint_not_inherited_by_default() {
        assert_eq!(
            object(r#"{"type": "domain_keyword", "value": ["ads", "track.com"]}"#),
            vec!["REGEX,ads", "DOMAIN-SUFFIX,track.com"]
        );
    }

    #[test]
    fn test_type_hint_inherited_when_enabled() {
        let classifier = Classifier::with_options(ClassifierOptions {
            inherit_type_hints: true,
        });
        let value = RawValue::parse(r#"{"type": "domain_keyword", "value": ["ads", ["track"]]}"#).unwrap();
        let out = lines(classifier.classify_object(value.as_object().unwrap()));
        assert_eq!(out, vec!["DOMAIN-KEYWORD,ads", "DOMAIN-KEYWORD,track"]);
    }

    #[test]
    fn test_unknown_hint_falls_back_to_heuristics() {
        assert_eq!(
            object(r#"{"kind": "whatever", "value": "||ads.example.com^"}"#),
            vec!["DOMAIN-SUFFIX,ads.example.com"]
        );
    }

    #[test]
    fn test_hint_uses_trimmed_content_verbatim() {
        assert_eq!(
            object(r#"{"type": "IP-CIDR", "value": "  10.0.0.0/8 "}"#),
            vec!["IP-CIDR,10.0.0.0/8"]
        );
        assert_eq!(
            object(r#"{"rule_type": "regex", "pattern": "^ad[0-9]+\\."}"#),
            vec![r"REGEX,^ad[0-9]+\."]
        );
    }

    #[test]
    fn test_numeric_content() {
        assert_eq!(object(r#"{"value": 42}"#), vec!["REGEX,42"]);
    }

    #[test]
    fn test_nested_object_content() {
        assert_eq!(
            object(r#"{"rule": {"type": "domain_suffix", "value": "x.org"}}"#),
            vec!["DOMAIN-SUFFIX,x.org"]
        );
    }

    #[test]
    fn test_hinted_type_order() {
        assert_eq!(hinted_type("domain_suffix"), Some(RuleType::DomainSuffix));
        assert_eq!(hinted_type("domain-suffix"), Some(RuleType::DomainSuffix));
        assert_eq!(hinted_type("suffix"), Some(RuleType::DomainSuffix));
        assert_eq!(hinted_type("domain_keyword"), Some(RuleType::DomainKeyword));
        assert_eq!(hinted_type("domainkey"), Some(RuleType::DomainKeyword));
        assert_eq!(hinted_type("domain"), Some(RuleType::DomainSuffix));
        assert_eq!(hinted_type("ip-cidr"), Some(RuleType::IpCidr));
        assert_eq!(hinted_type("cidr"), Some(RuleType::IpCidr));
        assert_eq!(hinted_type("regex"), Some(RuleType::Regex));
        assert_eq!(hinted_type("re"), Some(RuleType::Regex));
        assert_eq!(hinted_type("geoip"), Some(RuleType::IpCidr));
        assert_eq!(hinted_type("process"), None);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let value = RawValue::parse(r#"{"payload": ["a.com", "*.b.com", {"type": "cidr", "value": "1.1.1.1/32"}]}"#)
            .unwrap();
        let classifier = Classifier::new();
        let first = lines(classifier.classify_object(value.as_object().unwrap()));
        let second = lines(classifier.classify_object(value.as_object().unwrap()));
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
