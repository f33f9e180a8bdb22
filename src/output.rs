//! Rule list rendering and file output.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::converter::Mode;
use crate::ruleset::RuleSet;
use crate::{Error, Result};

/// Name written into the `# Converted by` header line.
pub const GENERATOR: &str = concat!("rulelist ", env!("CARGO_PKG_VERSION"));

/// Comment header written above the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Where the rules came from (URL or file path)
    pub source: String,
    /// Conversion mode used
    pub mode: Mode,
}

impl Header {
    pub fn new(source: impl Into<String>, mode: Mode) -> Self {
        Self {
            source: source.into(),
            mode,
        }
    }
}

/// Render a rule set as rule list text.
///
/// Output is a comment header followed by one rule per line and a trailing
/// newline. Identical input renders byte-identical text.
pub fn render(rules: &RuleSet, header: &Header) -> String {
    let source = header.source.replace(['\r', '\n'], " ");

    let mut out = String::new();
    out.push_str(&format!("# Converted by {}\n", GENERATOR));
    out.push_str(&format!("# Source: {}\n", source));
    out.push_str(&format!("# Rules: {}\n", rules.len()));
    out.push_str(&format!("# Mode: {}\n", header.mode.name()));
    out.push_str("# Format: TYPE,CONTENT (no action column)\n");

    for line in rules {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

/// Render and write a rule set to `path`.
///
/// Parent directories are created as needed. The file is written to a
/// temporary file in the same directory and renamed into place.
/// Returns the number of bytes written.
pub fn write_rule_file(path: &Path, rules: &RuleSet, header: &Header) -> Result<usize> {
    let text = render(rules, header);

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(text.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| Error::Io(e.error))?;

    log::info!("Wrote {} rules to {:?} ({} bytes)", rules.len(), path, text.len());
    Ok(text.len())
}
