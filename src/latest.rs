//! Publishing a completed snapshot as `Latest`.

use crate::chain::latest_link;
use crate::error::{Result, SnapshotError};
use crate::snapshot::SnapshotId;
use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::Path;

/// Points `Latest` at the snapshot `id`.
///
/// Must only be called once the snapshot's transfer has succeeded. The old
/// link is removed and a new one created, relative to the snapshots root so
/// the root can be moved. The two steps are not atomic: a concurrent reader
/// may briefly see no `Latest`, and two concurrent publishers may interleave.
/// Callers running more than one snapshot at a time against the same root
/// must serialize runs themselves.
pub fn publish(snapshots: &Path, id: &SnapshotId) -> Result<()> {
    let link = latest_link(snapshots);
    match fs::remove_file(&link) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(SnapshotError::storage(
                "unable to remove latest backup link",
                &link,
                e,
            ));
        }
    }
    symlink(id.as_str(), &link)
        .map_err(|e| SnapshotError::storage("unable to update latest backup link", &link, e))
}
