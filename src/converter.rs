//! JSON rule document to rule set conversion.

use serde::Deserialize;

use crate::classifier::{Classifier, ClassifierOptions, LineResult};
use crate::extractor::flatten;
use crate::raw::RawValue;
use crate::ruleset::{Ordering, RuleSet, RuleSetBuilder};
use crate::schema::schema_lines;
use crate::Result;

/// Conversion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Walk arbitrary JSON and classify every candidate
    #[default]
    General,
    /// Trust the `rules[].domain*` schema and only clean domains
    Schema,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::General => "general",
            Mode::Schema => "schema",
        }
    }
}

/// Counters collected during one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Rule candidates found by the extractor (general mode only)
    pub candidates: usize,
    /// Lines produced, duplicates included
    pub emitted: usize,
    /// Entries dropped because they could not form a valid line
    pub skipped: usize,
    /// Lines dropped as exact duplicates
    pub duplicates: usize,
}

/// Rule document converter.
///
/// # Example
///
/// ```
/// use rulelist::Converter;
///
/// let rules = Converter::new()
///     .convert_str(r#"{"payload": ["||ads.example.com^", "192.168.1.0/24"]}"#)
///     .unwrap();
/// assert!(rules.contains("DOMAIN-SUFFIX,ads.example.com"));
/// assert!(rules.contains("IP-CIDR,192.168.1.0/24"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    mode: Mode,
    ordering: Ordering,
    classifier: Classifier,
}

impl Converter {
    /// Create a converter in general mode with insertion ordering.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_classifier_options(mut self, options: ClassifierOptions) -> Self {
        self.classifier = Classifier::with_options(options);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Parse and convert a JSON document.
    pub fn convert_str(&self, json: &str) -> Result<RuleSet> {
        let value = RawValue::parse(json)?;
        Ok(self.convert_value(&value))
    }

    /// Convert a decoded JSON document.
    pub fn convert_value(&self, value: &RawValue) -> RuleSet {
        self.convert_with_stats(value).0
    }

    /// Convert a decoded JSON document, also returning counters.
    pub fn convert_with_stats(&self, value: &RawValue) -> (RuleSet, ConvertStats) {
        let mut stats = ConvertStats::default();
        let mut builder = RuleSetBuilder::new();

        match self.mode {
            Mode::General => {
                let candidates = flatten(value);
                stats.candidates = candidates.len();
                for candidate in &candidates {
                    collect(&mut builder, &mut stats, self.classifier.classify(candidate));
                }
            }
            Mode::Schema => match schema_lines(value) {
                Some(lines) => collect(&mut builder, &mut stats, lines),
                None => log::warn!("Document has no \"rules\" array; writing an empty rule list"),
            },
        }

        log::debug!(
            "Converted {} candidates: {} lines emitted, {} skipped, {} duplicates",
            stats.candidates,
            stats.emitted,
            stats.skipped,
            stats.duplicates
        );

        (builder.build(self.ordering), stats)
    }
}

fn collect(builder: &mut RuleSetBuilder, stats: &mut ConvertStats, lines: Vec<LineResult>) {
    for line in lines {
        match line {
            Ok(line) => {
                stats.emitted += 1;
                if !builder.insert(line) {
                    stats.duplicates += 1;
                }
            }
            Err(e) => {
                stats.skipped += 1;
                log::debug!("Skipping rule entry: {}", e);
            }
        }
    }
}
