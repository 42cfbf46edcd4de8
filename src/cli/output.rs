use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::core::{DiffError, DiffStats, Edit};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `+ name value` lines, uncolored
    #[default]
    Plain,
    /// `+ name value` lines, green additions and red removals
    Pretty,
    /// One JSON object per edit
    Json,
}

/// Format a single edit, without a trailing newline
pub fn format_edit(edit: &Edit, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => edit.to_string(),
        OutputFormat::Pretty => {
            let line = edit.to_string();
            if edit.is_add() {
                line.green().to_string()
            } else {
                line.red().to_string()
            }
        }
        OutputFormat::Json => serde_json::to_string(edit).unwrap_or_else(|_| "{}".to_string()),
    }
}

/// Write every edit to `out`, stopping at the first read failure
///
/// A reader that hangs up early (`zone-diff ... | head`) ends the output
/// quietly; the count covers the edits written before that.
pub fn write_edits<I, W>(edits: I, out: &mut W, format: OutputFormat) -> Result<u64>
where
    I: IntoIterator<Item = Result<Edit, DiffError>>,
    W: Write,
{
    let mut written = 0u64;
    for edit in edits {
        let edit = edit?;
        match writeln!(out, "{}", format_edit(&edit, format)) {
            Ok(()) => written += 1,
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!(written, "output closed early");
                return Ok(written);
            }
            Err(e) => return Err(e).context("Failed to write diff output"),
        }
    }

    match out.flush() {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
            Err(e).context("Failed to write diff output")
        }
        _ => Ok(written),
    }
}

/// Human-readable run summary
pub fn format_stats(stats: &DiffStats, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return serde_json::to_string(stats).unwrap_or_else(|_| "{}".to_string());
    }

    let mut output = String::new();
    output.push_str(&format!(
        "left:  {} lines, {} skipped\n",
        stats.left.lines, stats.left.skipped
    ));
    output.push_str(&format!(
        "right: {} lines, {} skipped\n",
        stats.right.lines, stats.right.skipped
    ));

    let adds = format!("{} added", stats.adds);
    let removes = format!("{} removed", stats.removes);
    if format == OutputFormat::Pretty {
        output.push_str(&format!("{}, {}", adds.green(), removes.red()));
    } else {
        output.push_str(&format!("{}, {}", adds, removes));
    }
    output
}
