//! Configuration for zone-diff
//!
//! Supports loading from `.zone-diff.toml` (working directory) or
//! `~/.config/zone-diff/config.toml` (global).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::output::OutputFormat;
use crate::core::{DiffOptions, Polarity};
use crate::input::Compression;
use crate::utils::{ANY_RECORD_TYPE, NS_RECORD_TYPE};

/// Name of the working-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".zone-diff.toml";

/// Full zone-diff configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDiffConfig {
    /// Record type to compare, `"*"` for any
    pub record_type: String,

    /// Which input is the newer zone
    pub polarity: Polarity,

    /// How input files are encoded
    pub compression: Compression,

    /// Output format
    pub format: OutputFormat,
}

impl Default for ZoneDiffConfig {
    fn default() -> Self {
        Self {
            record_type: NS_RECORD_TYPE.to_string(),
            polarity: Polarity::Forward,
            compression: Compression::None,
            format: OutputFormat::Plain,
        }
    }
}

impl ZoneDiffConfig {
    /// Load configuration from `dir`, falling back to global config
    pub fn load(dir: &Path) -> Result<Self> {
        let local = Self::local_config_path(dir);
        if local.exists() {
            return Self::load_from_file(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from_file(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Get global config path (~/.config/zone-diff/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zone-diff").join("config.toml"))
    }

    pub fn local_config_path(dir: &Path) -> PathBuf {
        dir.join(LOCAL_CONFIG_FILE)
    }

    /// Engine settings described by this config
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            record_type: record_type_filter(&self.record_type),
            polarity: self.polarity,
        }
    }
}

/// Record type filter for a configured type. Blank or `"*"` means any type.
pub fn record_type_filter(record_type: &str) -> Option<String> {
    match record_type.trim() {
        "" | ANY_RECORD_TYPE => None,
        other => Some(other.to_string()),
    }
}
