//! Snapshot identifiers and allocation of new snapshot directories.

use crate::constants::{SNAPSHOT_ID_FORMAT, SNAPSHOT_MODE};
use crate::error::{Result, SnapshotError};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;
use std::fs::DirBuilder;
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

/// Name of a snapshot directory: a UTC timestamp with second resolution,
/// e.g. `20240131T235959Z`.
///
/// Identifiers sort lexicographically in chronological order and contain
/// only filesystem-safe characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Renders `time` as an identifier.
    pub fn from_time(time: DateTime<Utc>) -> Self {
        SnapshotId(time.format(SNAPSHOT_ID_FORMAT).to_string())
    }

    /// Parses an identifier, rejecting anything not in the exact format.
    pub fn parse(name: &str) -> Option<Self> {
        // chrono accepts some variation in field widths, the length pins it down
        if name.len() != "YYYYMMDDTHHMMSSZ".len() {
            return None;
        }
        NaiveDateTime::parse_from_str(name, SNAPSHOT_ID_FORMAT)
            .ok()
            .map(|_| SnapshotId(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A snapshot directory inside the snapshots root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub path: PathBuf,
}

/// Creates the directory for a new snapshot taken at `now`.
///
/// The directory is created exclusively: if a snapshot with the same
/// identifier already exists (two runs within the same second), this fails
/// instead of reusing it.
pub fn allocate(snapshots: &Path, now: DateTime<Utc>) -> Result<Snapshot> {
    let id = SnapshotId::from_time(now);
    let path = snapshots.join(id.as_str());
    DirBuilder::new()
        .mode(SNAPSHOT_MODE)
        .create(&path)
        .map_err(|e| {
            let context = if e.kind() == io::ErrorKind::AlreadyExists {
                "snapshot root already exists"
            } else {
                "unable to create snapshot root"
            };
            SnapshotError::storage(context, &path, e)
        })?;
    Ok(Snapshot { id, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, h, m, s).unwrap()
    }

    #[test]
    fn test_id_format() {
        assert_eq!(SnapshotId::from_time(at(23, 59, 59)).as_str(), "20240131T235959Z");
        assert_eq!(SnapshotId::from_time(at(1, 2, 3)).as_str(), "20240131T010203Z");
    }

    #[test]
    fn test_id_order_is_chronological() {
        let earlier = SnapshotId::from_time(at(9, 59, 59));
        let later = SnapshotId::from_time(at(10, 0, 0));
        assert!(earlier < later);
        assert!(earlier.as_str() < later.as_str());
    }

    #[test]
    fn test_parse() {
        assert!(SnapshotId::parse("20240131T235959Z").is_some());
        assert!(SnapshotId::parse("20240131T235959").is_none());
        assert!(SnapshotId::parse("2024-01-31").is_none());
        assert!(SnapshotId::parse("20241331T000000Z").is_none());
        assert!(SnapshotId::parse("Latest").is_none());
    }

    #[test]
    fn test_allocate_creates_owner_only_directory() {
        let temp = tempdir().unwrap();
        let snapshot = allocate(temp.path(), at(12, 0, 0)).unwrap();
        assert_eq!(snapshot.path, temp.path().join("20240131T120000Z"));
        assert!(snapshot.path.is_dir());
        let mode = fs::metadata(&snapshot.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn test_allocate_is_exclusive() {
        let temp = tempdir().unwrap();
        allocate(temp.path(), at(12, 0, 0)).unwrap();
        let err = allocate(temp.path(), at(12, 0, 0)).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::StorageError);
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_allocate_without_root_fails() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing");
        let err = allocate(&missing, at(12, 0, 0)).unwrap_err();
        assert!(err.to_string().contains("unable to create snapshot root"));
    }
}
