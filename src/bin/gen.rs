//! rulelist-gen: CLI tool for converting JSON rule documents into rule lists.

use clap::Parser;
use rulelist::{Config, Mode, Ordering};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rulelist-gen")]
#[command(version)]
#[command(about = "Convert a JSON rule document into a TYPE,CONTENT rule list", long_about = None)]
struct Cli {
    /// URL of the JSON rule document
    #[arg(short, long)]
    url: Option<String>,

    /// Local JSON rule document (instead of a URL)
    #[arg(short, long, conflicts_with = "url")]
    input: Option<PathBuf>,

    /// Output rule list file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read only rules[].domain/domain_suffix/domain_keyword
    #[arg(long)]
    schema: bool,

    /// Sort rules lexicographically instead of keeping first-seen order
    #[arg(long)]
    sort: bool,

    /// Apply an object's type hint to each element of its value array
    #[arg(long)]
    inherit_type_hints: bool,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match build_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let default_filter = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match rulelist::run(&config) {
        Ok(summary) => {
            println!(
                "Successfully converted {} -> {:?} ({} rules)",
                config.source(),
                summary.output,
                summary.rules.len()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_config(cli: Cli) -> rulelist::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::default(),
    };

    if let Some(url) = cli.url {
        config.url = url;
        config.input = None;
    }
    if let Some(input) = cli.input {
        config.input = Some(input);
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.schema {
        config.mode = Mode::Schema;
    }
    if cli.sort {
        config.ordering = Ordering::Sorted;
    }
    if cli.inherit_type_hints {
        config.inherit_type_hints = true;
    }
    if cli.timeout.is_some() {
        config.timeout_secs = cli.timeout;
    }
    if cli.verbose {
        config.verbose = true;
    }

    config.validate()?;
    Ok(config)
}
