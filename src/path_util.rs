//! Validation and normalization of the source and snapshots roots.

use crate::constants::SNAPSHOT_MODE;
use crate::error::{Result, SnapshotError};
use std::ffi::{OsStr, OsString};
use std::fs::DirBuilder;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::DirBuilderExt;
use std::path::{self, Path, PathBuf};

/// Source and snapshots roots, ready for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Source root, always ending with `/` so that its contents (not the
    /// directory itself) are copied into the snapshot.
    pub source: OsString,
    /// Absolute snapshots root.
    pub snapshots: PathBuf,
}

/// Validates and normalizes the source and snapshots roots.
///
/// Does not touch the filesystem; see [`ensure_snapshots_root`].
///
/// # Errors
/// Returns `InvalidArgument` if either path is empty, and a storage error if
/// the current directory cannot be determined for a relative snapshots root.
pub fn resolve(source: &OsStr, snapshots: &OsStr) -> Result<ResolvedPaths> {
    if source.is_empty() {
        return Err(SnapshotError::InvalidArgument("empty root path".into()));
    }
    if snapshots.is_empty() {
        return Err(SnapshotError::InvalidArgument(
            "empty snapshots directory path".into(),
        ));
    }

    let source = with_trailing_separator(source.to_os_string());
    let snapshots = PathBuf::from(snapshots);
    let snapshots = path::absolute(&snapshots).map_err(|e| {
        SnapshotError::storage("unable to resolve snapshots directory", &snapshots, e)
    })?;

    Ok(ResolvedPaths { source, snapshots })
}

/// Appends a `/` to `path` unless it already ends with one.
///
/// The transfer tool copies the *contents* of a source ending in `/`, and the
/// directory itself otherwise. It does not care about the destination.
pub fn with_trailing_separator(mut path: OsString) -> OsString {
    if path.as_bytes().last() != Some(&b'/') {
        path.push("/");
    }
    path
}

/// Creates the snapshots root and any missing parents, owner-only.
///
/// An already existing directory is not an error.
pub fn ensure_snapshots_root(snapshots: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .mode(SNAPSHOT_MODE)
        .create(snapshots)
        .map_err(|e| SnapshotError::storage("unable to create snapshots directory", snapshots, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn test_source_gets_trailing_separator() {
        let paths = resolve(OsStr::new("/data"), OsStr::new("/snapshots")).unwrap();
        assert_eq!(paths.source, OsString::from("/data/"));
    }

    #[test]
    fn test_source_with_trailing_separator_is_unchanged() {
        let paths = resolve(OsStr::new("/data/"), OsStr::new("/snapshots")).unwrap();
        assert_eq!(paths.source, OsString::from("/data/"));
    }

    #[test]
    fn test_empty_paths_are_rejected() {
        let err = resolve(OsStr::new(""), OsStr::new("/snapshots")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("root"));

        let err = resolve(OsStr::new("/data"), OsStr::new("")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("snapshots"));
    }

    #[test]
    fn test_relative_snapshots_root_becomes_absolute() {
        let paths = resolve(OsStr::new("data"), OsStr::new("snaps")).unwrap();
        assert!(paths.snapshots.is_absolute());
        assert!(paths.snapshots.ends_with("snaps"));
        // the source is handed to the transfer tool as given
        assert_eq!(paths.source, OsString::from("data/"));
    }

    #[test]
    fn test_tilde_is_not_expanded() {
        let paths = resolve(OsStr::new("~"), OsStr::new("~")).unwrap();
        assert_eq!(paths.source, OsString::from("~/"));
        assert!(paths.snapshots.ends_with("~"));
        assert!(paths.snapshots.is_absolute());

        let paths = resolve(OsStr::new("$HOME/data"), OsStr::new("/snapshots")).unwrap();
        assert_eq!(paths.source, OsString::from("$HOME/data/"));
    }

    #[test]
    fn test_ensure_snapshots_root_creates_parents_owner_only() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("a").join("b");
        ensure_snapshots_root(&root).unwrap();
        assert!(root.is_dir());
        let mode = fs::metadata(&root).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);

        // second call on an existing directory is fine
        ensure_snapshots_root(&root).unwrap();
    }

    #[test]
    fn test_ensure_snapshots_root_over_file_fails() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, b"x").unwrap();
        let err = ensure_snapshots_root(&file).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::StorageError);
    }
}
