//! Arguments for, and invocation of, the external transfer program.
//!
//! The transfer program is a black box: it receives an ordered argument
//! list, shares our standard streams, and is judged only by its exit status.
//! Anything implementing [`Transfer`] can stand in for rsync.

use crate::constants::{
    ARCHIVE_FLAGS, EXCLUDE_FLAG, LINK_DEST_FLAG, NO_DEVICES_FLAG, NO_SPECIALS_FLAG,
};
use crate::error::{ExitInfo, Result, SnapshotError};
use std::ffi::OsString;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Everything the transfer of one snapshot needs except its destination,
/// which only exists once the snapshot directory has been allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSpec {
    /// Source root, with trailing separator.
    pub source: OsString,
    /// Previous snapshot to hardlink unchanged files against.
    pub base: Option<PathBuf>,
    /// Paths relative to the source root, in the order given.
    pub excludes: Vec<OsString>,
}

impl TransferSpec {
    pub fn new(source: OsString, base: Option<PathBuf>, excludes: Vec<OsString>) -> Self {
        TransferSpec {
            source,
            base,
            excludes,
        }
    }

    /// Builds the ordered argument list copying the source into `destination`.
    ///
    /// `-aPh --no-specials --no-devices [--link-dest=BASE] [--exclude=PATH]... SOURCE DESTINATION`
    pub fn arguments(&self, destination: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [ARCHIVE_FLAGS, NO_SPECIALS_FLAG, NO_DEVICES_FLAG]
            .into_iter()
            .map(OsString::from)
            .collect();
        if let Some(base) = &self.base {
            let mut flag = OsString::from(LINK_DEST_FLAG);
            flag.push(base);
            args.push(flag);
        }
        args.extend(self.excludes.iter().map(|path| {
            let mut flag = OsString::from(EXCLUDE_FLAG);
            flag.push(path);
            flag
        }));
        args.push(self.source.clone());
        args.push(destination.as_os_str().to_os_string());
        args
    }
}

/// A backend able to copy a tree given an argument list.
pub trait Transfer {
    /// Runs one transfer to completion.
    ///
    /// # Errors
    /// Returns a transfer error if the backend could not be started or did
    /// not report success.
    fn transfer(&self, args: &[OsString]) -> Result<()>;
}

/// Runs an rsync-compatible program as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rsync {
    program: String,
}

impl Rsync {
    pub fn new(program: impl Into<String>) -> Self {
        Rsync {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Transfer for Rsync {
    fn transfer(&self, args: &[OsString]) -> Result<()> {
        debug!("running {} {:?}", self.program, args);
        // stdio is inherited so progress is visible and prompts reach the user
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| SnapshotError::TransferSpawn {
                program: self.program.clone(),
                source: e,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(SnapshotError::TransferExit {
                program: self.program.clone(),
                status: exit_info(status),
            })
        }
    }
}

fn exit_info(status: ExitStatus) -> ExitInfo {
    if let Some(code) = status.code() {
        ExitInfo::Code(code)
    } else if let Some(signal) = status.signal() {
        ExitInfo::Signal(signal)
    } else {
        ExitInfo::Unknown
    }
}
