//! snapper: timestamped, incremental, hardlink-deduplicated snapshots.
//!
//! Each run copies a source tree into a new `YYYYMMDDTHHMMSSZ` directory of a
//! snapshots root with rsync, hardlinking unchanged files against the
//! snapshot referenced by the root's `Latest` symlink, and repoints `Latest`
//! only once the copy has succeeded.
//!
//! At most one run per snapshots root may be active at a time. snapper does
//! no locking; wrap runs in an external lock if they can overlap.

#[cfg(not(unix))]
compile_error!("snapper relies on symbolic links and Unix permissions");

pub mod chain;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod latest;
pub mod path_util;
pub mod run;
pub mod snapshot;
pub mod sysexits;
pub mod transfer;

pub use error::{ErrorKind, ExitInfo, Result, SnapshotError};
pub use run::{Outcome, Request, RunFailure, RunState, execute};
pub use transfer::{Rsync, Transfer, TransferSpec};
