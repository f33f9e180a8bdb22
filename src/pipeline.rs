//! End-to-end conversion run: load, convert, write.

use std::path::PathBuf;

use crate::config::Config;
use crate::converter::ConvertStats;
use crate::fetch::read_source;
use crate::output::write_rule_file;
use crate::ruleset::RuleSet;
use crate::Result;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rules: RuleSet,
    pub stats: ConvertStats,
    pub output: PathBuf,
    pub bytes_written: usize,
}

/// Run one conversion.
///
/// A load failure aborts before anything is written, so a failed run never
/// leaves a partial output file.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    let document = read_source(&config.source(), &config.fetch_config())?;
    let (rules, stats) = config.converter().convert_with_stats(&document);

    log::info!(
        "Converted {} unique rules ({} skipped, {} duplicates)",
        rules.len(),
        stats.skipped,
        stats.duplicates
    );

    let bytes_written = write_rule_file(&config.output, &rules, &config.header())?;

    Ok(RunSummary {
        rules,
        stats,
        output: config.output.clone(),
        bytes_written,
    })
}
