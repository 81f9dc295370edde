//! Optional configuration file.
//!
//! snapper reads no configuration unless asked to with `--config <FILE>`.
//! The file is TOML:
//!
//! ```toml
//! rsync = "/usr/local/bin/rsync"
//! exclude = [".cache", "node_modules"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

/// Settings that may be provided by a configuration file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Transfer program to run instead of `rsync`.
    pub rsync: Option<String>,
    /// Paths relative to the source root excluded from every snapshot.
    pub exclude: Vec<String>,
}

impl Config {
    /// Reads a configuration file.
    ///
    /// # Errors
    /// Returns an error naming the file if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = fs::read_to_string(path)
            .with_context(|| format!("Error reading config file '{}'", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("Error parsing config file '{}'", path.display()))
    }

    /// Exclusions from the file followed by `extra`, order preserved.
    pub fn excludes_with(&self, extra: &[OsString]) -> Vec<OsString> {
        self.exclude
            .iter()
            .map(OsString::from)
            .chain(extra.iter().cloned())
            .collect()
    }
}
