//! One snapshot run, from argument validation to publishing `Latest`.
//!
//! A run moves through the stages of [`RunState`] strictly in order. The
//! first failing stage aborts the run: nothing after it executes, and
//! nothing before it is undone. In particular a failed transfer leaves its
//! snapshot directory on disk for inspection and does not move `Latest`.

use crate::chain::{self, ChainBase};
use crate::error::{ErrorKind, SnapshotError};
use crate::latest;
use crate::path_util;
use crate::snapshot::{self, Snapshot};
use crate::transfer::{Transfer, TransferSpec};
use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Stages of a run. `Done` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Resolving,
    Inspecting,
    Building,
    Allocating,
    Transferring,
    Publishing,
    Done,
    Aborted,
}

impl RunState {
    /// The stage that follows a successful `self`.
    fn next(self) -> RunState {
        match self {
            RunState::Resolving => RunState::Inspecting,
            RunState::Inspecting => RunState::Building,
            RunState::Building => RunState::Allocating,
            RunState::Allocating => RunState::Transferring,
            RunState::Transferring => RunState::Publishing,
            RunState::Publishing | RunState::Done => RunState::Done,
            RunState::Aborted => RunState::Aborted,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Aborted)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Resolving => "resolving paths",
            RunState::Inspecting => "inspecting latest snapshot",
            RunState::Building => "building transfer arguments",
            RunState::Allocating => "allocating snapshot",
            RunState::Transferring => "transferring",
            RunState::Publishing => "publishing latest snapshot",
            RunState::Done => "done",
            RunState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// What to snapshot, and where.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub source: OsString,
    pub snapshots: OsString,
    /// Paths relative to the source root to leave out, in order.
    pub excludes: Vec<OsString>,
}

/// A completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The snapshot now referenced by `Latest`.
    pub snapshot: Snapshot,
    /// The snapshot it was hardlinked against, if any.
    pub base: Option<ChainBase>,
}

/// An aborted run: the stage that failed and why.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RunFailure {
    pub stage: RunState,
    #[source]
    pub error: SnapshotError,
}

impl RunFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }
}

/// Tracks the current stage and turns stage errors into [`RunFailure`].
struct Progress {
    state: RunState,
}

impl Progress {
    fn step<T>(&mut self, result: Result<T, SnapshotError>) -> Result<T, RunFailure> {
        match result {
            Ok(value) => {
                let next = self.state.next();
                debug!("{} -> {}", self.state, next);
                self.state = next;
                Ok(value)
            }
            Err(e) => {
                let stage = self.state;
                self.state = RunState::Aborted;
                debug!("run aborted while {stage}: {e}");
                Err(RunFailure { stage, error: e })
            }
        }
    }
}

/// Takes one snapshot of `request.source` into `request.snapshots`.
///
/// `now` names the new snapshot. Runs against the same snapshots root must
/// not overlap; see [`latest::publish`].
pub fn execute(
    request: &Request,
    transfer: &dyn Transfer,
    now: DateTime<Utc>,
) -> Result<Outcome, RunFailure> {
    let mut progress = Progress {
        state: RunState::Resolving,
    };

    let paths = progress.step(
        path_util::resolve(&request.source, &request.snapshots).and_then(|paths| {
            path_util::ensure_snapshots_root(&paths.snapshots)?;
            Ok(paths)
        }),
    )?;

    let base = progress.step(chain::inspect(&paths.snapshots))?;

    let spec = progress.step(Ok(TransferSpec::new(
        paths.source,
        base.as_ref().map(|base| base.link.clone()),
        request.excludes.clone(),
    )))?;

    let snapshot = progress.step(snapshot::allocate(&paths.snapshots, now))?;
    info!("taking snapshot {}", snapshot.path.display());

    let args = spec.arguments(&snapshot.path);
    progress.step(transfer.transfer(&args))?;

    progress.step(latest::publish(&paths.snapshots, &snapshot.id))?;
    debug_assert_eq!(progress.state, RunState::Done);
    info!("snapshot {} published as latest", snapshot.id);

    Ok(Outcome { snapshot, base })
}
