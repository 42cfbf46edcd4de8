pub mod output;

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{record_type_filter, ZoneDiffConfig};
use crate::core::{DiffOptions, DiffStats, MergeDiff, Polarity};
use crate::input::{open_zone_file, Compression};
use crate::utils::ANY_RECORD_TYPE;
use output::{format_stats, write_edits, OutputFormat};

/// Print the NS records that differ between two sorted zone files
#[derive(Debug, Parser)]
#[command(name = "zone-diff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First (older) zone file
    #[arg(short = '1', value_name = "PATH")]
    pub first: PathBuf,

    /// Second (newer) zone file
    #[arg(short = '2', value_name = "PATH")]
    pub second: PathBuf,

    /// Treat files as gzip compressed
    #[arg(long, conflicts_with = "compression")]
    pub gz: bool,

    /// Input encoding
    #[arg(long, value_enum)]
    pub compression: Option<Compression>,

    /// Log skipped lines and other diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Record type to compare (default: ns)
    #[arg(long, value_name = "TYPE", conflicts_with = "any_type")]
    pub record_type: Option<String>,

    /// Compare records of every type
    #[arg(long)]
    pub any_type: bool,

    /// Treat the first file as the newer zone
    #[arg(long)]
    pub reverse: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colors in output
    #[arg(long)]
    pub no_color: bool,

    /// Print line and edit counts to stderr when done
    #[arg(long)]
    pub summary: bool,

    /// Config file (default: ./.zone-diff.toml, then ~/.config/zone-diff/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Effective settings for one run, after config and flags are merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: DiffOptions,
    pub compression: Compression,
    pub format: OutputFormat,
}

impl Cli {
    /// Apply command-line overrides on top of a config file
    pub fn settings(&self, config: &ZoneDiffConfig) -> Settings {
        let mut options = config.diff_options();

        if self.any_type {
            options.record_type = None;
        } else if let Some(record_type) = &self.record_type {
            options.record_type = record_type_filter(record_type);
        }

        if self.reverse {
            options.polarity = Polarity::Reverse;
        }

        let compression = if self.gz {
            Compression::Gzip
        } else {
            self.compression.unwrap_or(config.compression)
        };

        Settings {
            options,
            compression,
            format: self.format.unwrap_or(config.format),
        }
    }

    fn load_config(&self) -> Result<ZoneDiffConfig> {
        match &self.config {
            Some(path) => ZoneDiffConfig::load_from_file(path),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                ZoneDiffConfig::load(&cwd)
            }
        }
    }
}

/// Diff two zone files, writing edits to `out`
pub fn diff_files<W: Write>(
    first: &Path,
    second: &Path,
    settings: &Settings,
    out: &mut W,
) -> Result<DiffStats> {
    let left = open_zone_file(first, settings.compression)?;
    let right = open_zone_file(second, settings.compression)?;

    tracing::debug!(
        first = %first.display(),
        second = %second.display(),
        record_type = settings.options.record_type.as_deref().unwrap_or(ANY_RECORD_TYPE),
        polarity = ?settings.options.polarity,
        "comparing zones"
    );

    let mut engine = MergeDiff::new(left, right, settings.options.clone());
    write_edits(engine.by_ref(), out, settings.format).with_context(|| {
        format!(
            "Failed to diff {} against {}",
            first.display(),
            second.display()
        )
    })?;

    Ok(*engine.stats())
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let config = cli.load_config()?;
    let settings = cli.settings(&config);

    if cli.no_color || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = diff_files(&cli.first, &cli.second, &settings, &mut out)?;

    if cli.summary {
        eprintln!("{}", format_stats(&stats, settings.format));
    }

    Ok(())
}
