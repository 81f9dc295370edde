/// Package name.
pub(crate) const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Transfer program used when none is configured. Looked up on `PATH`.
pub const DEFAULT_TRANSFER_PROGRAM: &str = "rsync";

/// Archive mode, partial progress and human-readable numbers.
pub(crate) const ARCHIVE_FLAGS: &str = "-aPh";
/// Do not copy sockets and FIFOs.
pub(crate) const NO_SPECIALS_FLAG: &str = "--no-specials";
/// Do not copy device nodes.
pub(crate) const NO_DEVICES_FLAG: &str = "--no-devices";
/// Prefix of the hardlink-base flag, followed by the base path.
pub(crate) const LINK_DEST_FLAG: &str = "--link-dest=";
/// Prefix of an exclusion flag, followed by a path relative to the source.
pub(crate) const EXCLUDE_FLAG: &str = "--exclude=";

/// Permissions of the snapshots root and of every snapshot directory.
pub(crate) const SNAPSHOT_MODE: u32 = 0o700;

/// Name of the symlink to the latest complete snapshot.
pub const LATEST_LINK_NAME: &str = "Latest";

/// `chrono` format of a snapshot identifier, e.g. `20240131T235959Z`.
pub const SNAPSHOT_ID_FORMAT: &str = "%Y%m%dT%H%M%SZ";
