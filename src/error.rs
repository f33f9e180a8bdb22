//! Error types for rulelist.

use thiserror::Error;

/// Error type for rulelist operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error (config files)
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Transport-level download error
    #[error("download error: {0}")]
    Download(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP error fetching {url}: {status}")]
    HttpStatus { url: String, status: u16 },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for rulelist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for a single rule line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleLineError {
    /// Content is empty after normalization
    #[error("empty rule content")]
    EmptyContent,

    /// Content would break the one-rule-per-line format
    #[error("rule content contains a line break: {0:?}")]
    EmbeddedNewline(String),
}
