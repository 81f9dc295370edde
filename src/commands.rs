//! Command-line interface definition for snapper.
//!
//! Turns the command line (and an optional configuration file) into a
//! [`Request`] plus the transfer backend that will serve it.

use crate::config::Config;
use crate::constants::{DEFAULT_TRANSFER_PROGRAM, PKG_NAME};
use crate::run::Request;
use crate::transfer::Rsync;
use anyhow::Result;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Create a timestamped, hardlink-deduplicated snapshot of ROOT inside
/// SNAPSHOTS and point SNAPSHOTS/Latest at it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory tree to snapshot.
    #[arg(value_name = "ROOT")]
    pub root: OsString,
    /// Directory holding the snapshots and the `Latest` link.
    #[arg(value_name = "SNAPSHOTS")]
    pub snapshots: OsString,
    /// Path, relative to ROOT, to leave out. Can be given several times.
    #[arg(long, value_name = "PATH")]
    pub exclude: Vec<OsString>,
    /// rsync-compatible program used for the transfer.
    #[arg(long, value_name = "PROGRAM")]
    pub rsync: Option<String>,
    /// TOML file providing `rsync` and `exclude` defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log more. Repeat for debug output.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the run request and transfer backend, merging in the
    /// configuration file if one was given.
    ///
    /// # Errors
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn into_request(self) -> Result<(Request, Rsync)> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let program = self
            .rsync
            .or(config.rsync.clone())
            .unwrap_or_else(|| DEFAULT_TRANSFER_PROGRAM.to_string());
        let request = Request {
            source: self.root,
            snapshots: self.snapshots,
            excludes: config.excludes_with(&self.exclude),
        };
        Ok((request, Rsync::new(program)))
    }
}

/// Installs the stderr log subscriber. `verbose` is the `-v` count.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("{PKG_NAME}={level}")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
