//! Error types shared by every stage of a snapshot run.

use crate::sysexits;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Unified result type for the fallible operations of a snapshot run.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// The four kinds of failure a run can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input.
    InvalidArgument,
    /// A filesystem operation failed (create, stat, remove, symlink).
    StorageError,
    /// The `Latest` pointer is not something a run can build on.
    CorruptState,
    /// The transfer program failed to start or exited unsuccessfully.
    TransferError,
}

/// Error raised by a snapshot run. Always terminal for the run.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{context} '{}': {source}", .path.display())]
    Storage {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{reason}: '{}'", .path.display())]
    CorruptState { reason: &'static str, path: PathBuf },

    #[error("unable to start transfer program '{program}': {source}")]
    TransferSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("transfer program '{program}' failed: {status}")]
    TransferExit { program: String, status: ExitInfo },
}

impl SnapshotError {
    pub(crate) fn storage(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        SnapshotError::Storage {
            context,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(reason: &'static str, path: impl Into<PathBuf>) -> Self {
        SnapshotError::CorruptState {
            reason,
            path: path.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SnapshotError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SnapshotError::Storage { .. } => ErrorKind::StorageError,
            SnapshotError::CorruptState { .. } => ErrorKind::CorruptState,
            SnapshotError::TransferSpawn { .. } | SnapshotError::TransferExit { .. } => {
                ErrorKind::TransferError
            }
        }
    }

    /// Process exit status to report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SnapshotError::InvalidArgument(_) => sysexits::EX_USAGE,
            SnapshotError::Storage { .. } => sysexits::EX_IOERR,
            SnapshotError::CorruptState { .. } => sysexits::EX_DATAERR,
            SnapshotError::TransferSpawn { .. } => sysexits::EX_UNAVAILABLE,
            SnapshotError::TransferExit { .. } => sysexits::EX_TEMPFAIL,
        }
    }
}

/// How the transfer program ended, when it did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitInfo {
    /// Exited with a non-zero status code.
    Code(i32),
    /// Killed by a signal.
    Signal(i32),
    /// Neither a code nor a signal was reported.
    Unknown,
}

impl fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitInfo::Code(code) => write!(f, "exit status {code}"),
            ExitInfo::Signal(signal) => write!(f, "terminated by signal {signal}"),
            ExitInfo::Unknown => f.write_str("unknown exit status"),
        }
    }
}
