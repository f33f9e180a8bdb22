//! Run configuration.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::classifier::ClassifierOptions;
use crate::converter::{Converter, Mode};
use crate::fetch::{FetchConfig, Source};
use crate::output::Header;
use crate::ruleset::Ordering;
use crate::{Error, Result};

/// Rule document fetched when no URL is configured.
pub const DEFAULT_URL: &str = "https://example.com/rules.json";

/// Output file written when no path is configured.
pub const DEFAULT_OUTPUT: &str = "rules.list";

/// Settings for one conversion run.
///
/// Can be loaded from a YAML file; missing fields take their defaults.
///
/// ```yaml
/// url: https://example.com/ads.json
/// output: out/ads.list
/// mode: schema
/// ordering: sorted
/// timeout_secs: 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote rule document
    pub url: String,
    /// Local rule document; takes precedence over `url`
    pub input: Option<PathBuf>,
    /// Output rule list path
    pub output: PathBuf,
    pub mode: Mode,
    pub ordering: Ordering,
    /// Thread an object's type hint into its array elements
    pub inherit_type_hints: bool,
    /// HTTP timeout in seconds
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            input: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            mode: Mode::default(),
            ordering: Ordering::default(),
            inherit_type_hints: false,
            timeout_secs: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Parse a YAML config.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Check for settings that cannot produce a run.
    pub fn validate(&self) -> Result<()> {
        if self.input.is_none() && self.url.trim().is_empty() {
            return Err(Error::Config("no rule source: url is empty".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::Config("output path is empty".to_string()));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// The rule source this config points at.
    pub fn source(&self) -> Source {
        match &self.input {
            Some(path) => Source::File(path.clone()),
            None => Source::Url(self.url.trim().to_string()),
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..FetchConfig::default()
        }
    }

    /// Build the converter described by this config.
    pub fn converter(&self) -> Converter {
        Converter::new()
            .with_mode(self.mode)
            .with_ordering(self.ordering)
            .with_classifier_options(ClassifierOptions {
                inherit_type_hints: self.inherit_type_hints,
            })
    }

    pub fn header(&self) -> Header {
        Header::new(self.source().to_string(), self.mode)
    }
}
