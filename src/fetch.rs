//! Rule source loading.
//!
//! A source is either a remote URL fetched with a single blocking GET, or a
//! local JSON file. There is no retry: any transport error or non-success
//! status fails the run.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::output::GENERATOR;
use crate::raw::RawValue;
use crate::{Error, Result};

/// Where the rule document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// HTTP(S) URL
    Url(String),
    /// Local JSON file
    File(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Request timeout; `None` keeps the client default
    pub timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: GENERATOR.replace(' ', "/"),
        }
    }
}

/// Fetch and decode a JSON document from `url`.
pub fn fetch_json(url: &str, config: &FetchConfig) -> Result<RawValue> {
    let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.as_str());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    log::info!("Fetching rules from {}", url);
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes()?;
    log::debug!("Downloaded {} bytes from {}", body.len(), url);
    RawValue::parse_slice(&body)
}

/// Load and decode the document behind `source`.
pub fn read_source(source: &Source, config: &FetchConfig) -> Result<RawValue> {
    match source {
        Source::Url(url) => fetch_json(url, config),
        Source::File(path) => {
            log::info!("Reading rules from {:?}", path);
            let content = fs::read(path)?;
            RawValue::parse_slice(&content)
        }
    }
}
