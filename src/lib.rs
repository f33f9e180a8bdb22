//! rulelist - Convert JSON filtering rule documents into rule lists.
//!
//! Rule providers publish domain lists, suffixes, keywords, IP ranges and
//! patterns as JSON of many shapes. This crate turns such a document into a
//! deduplicated list of `TYPE,CONTENT` lines for traffic-filtering clients.
//!
//! # Quick Start
//!
//! ```
//! use rulelist::{Converter, Ordering};
//!
//! let json = r#"{
//!     "groups": [
//!         {"payload": ["||ads.example.com^", "*.tracker.net"]},
//!         {"type": "domain_keyword", "value": "adserv"},
//!         "192.168.1.0/24"
//!     ]
//! }"#;
//!
//! let rules = Converter::new()
//!     .with_ordering(Ordering::Sorted)
//!     .convert_str(json)
//!     .unwrap();
//!
//! assert_eq!(rules.len(), 4);
//! assert!(rules.contains("DOMAIN-KEYWORD,adserv"));
//! ```
//!
//! # Pipeline
//!
//! 1. **Extract**: walk the JSON and collect rule candidates. An object with
//!    a rule-ish key (`payload`, `value`, `domain`, ...) and at most 30 keys
//!    is one rule; anything else is a container.
//! 2. **Classify**: turn each candidate into lines, using an explicit type
//!    hint when present and pattern heuristics otherwise.
//! 3. **Aggregate**: drop duplicate lines, keeping first-occurrence order
//!    (or sorting).
//!
//! A schema-driven mode ([`Mode::Schema`]) skips extraction and reads
//! `rules[].domain`, `domain_suffix` and `domain_keyword` directly.
//!
//! # Rule Types
//!
//! - **DOMAIN-SUFFIX**: a domain and all its subdomains
//! - **DOMAIN-KEYWORD**: any domain containing a substring
//! - **IP-CIDR**: an IPv4 address block
//! - **REGEX**: a regular expression (also used for literal fallbacks)

mod error;
mod rule_type;

pub mod classifier;
pub mod config;
pub mod converter;
pub mod extractor;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod raw;
pub mod rule;
pub mod ruleset;
pub mod schema;

// Re-export core types
pub use error::{Error, Result, RuleLineError};
pub use rule_type::RuleType;

pub use classifier::{Classifier, ClassifierOptions};
pub use config::Config;
pub use converter::{ConvertStats, Converter, Mode};
pub use extractor::{flatten, RuleCandidate};
pub use fetch::{FetchConfig, Source};
pub use output::Header;
pub use pipeline::{run, RunSummary};
pub use raw::{RawObject, RawValue};
pub use rule::RuleLine;
pub use ruleset::{Ordering, RuleSet, RuleSetBuilder};
