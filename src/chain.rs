//! Inspection of the `Latest` pointer that links snapshots into a chain.

use crate::constants::LATEST_LINK_NAME;
use crate::error::{Result, SnapshotError};
use crate::snapshot::SnapshotId;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The snapshot the next transfer hardlinks unchanged files against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBase {
    /// Path of the `Latest` link itself. The transfer tool resolves it.
    pub link: PathBuf,
    /// What the link points at, as stored in the link.
    pub target: PathBuf,
}

/// Path of the `Latest` pointer inside a snapshots root.
pub fn latest_link(snapshots: &Path) -> PathBuf {
    snapshots.join(LATEST_LINK_NAME)
}

/// Looks up the hardlink base for the next snapshot.
///
/// Returns `Ok(None)` if there is no `Latest` pointer yet (first snapshot).
/// The pointer is inspected without following it first; it must be a
/// symbolic link, and it must resolve to an existing directory. Anything
/// else is reported as corrupt state so the run stops before touching disk.
pub fn inspect(snapshots: &Path) -> Result<Option<ChainBase>> {
    let link = latest_link(snapshots);
    let metadata = match fs::symlink_metadata(&link) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no latest pointer, taking a full snapshot");
            return Ok(None);
        }
        Err(e) => {
            return Err(SnapshotError::storage(
                "unable to inspect latest backup link path",
                &link,
                e,
            ));
        }
    };
    if !metadata.file_type().is_symlink() {
        return Err(SnapshotError::corrupt(
            "latest backup link path exists but is not a symlink",
            &link,
        ));
    }

    let target = fs::read_link(&link)
        .map_err(|e| SnapshotError::storage("unable to read latest backup link", &link, e))?;
    match fs::metadata(&link) {
        Ok(resolved) if resolved.is_dir() => {}
        Ok(_) => {
            return Err(SnapshotError::corrupt(
                "latest backup link does not reference a directory",
                &link,
            ));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SnapshotError::corrupt("latest backup link is dangling", &link));
        }
        Err(e) => {
            return Err(SnapshotError::storage(
                "unable to resolve latest backup link",
                &link,
                e,
            ));
        }
    }

    let well_formed = target
        .to_str()
        .and_then(SnapshotId::parse)
        .is_some();
    if !well_formed {
        warn!(
            "latest backup link points at {}, which is not a snapshot name",
            target.display()
        );
    }
    debug!("using {} -> {} as hardlink base", link.display(), target.display());
    Ok(Some(ChainBase { link, target }))
}
