//! legacy exit status codes for system programs.
//! reference: [SYSEXITS](https://man.freebsd.org/cgi/man.cgi?query=sysexits&apropos=0&sektion=0&manpath=FreeBSD+11.2-stable&arch=default&format=html)
//!
//! Only the codes snapper actually reports are defined here.

/// value: 64 <br>
/// The command was used incorrectly, e.g., with the wrong number of arguments, a bad flag, a bad syntax in a parameter, etc.
pub const EX_USAGE: i32 = 64;

/// value: 65 <br>
/// The input data was incorrect in some way. Used when the snapshots root is in a state snapper refuses to build on.
pub const EX_DATAERR: i32 = 65;

/// value: 69 <br>
/// A service is unavailable. Used when the transfer program cannot be started at all.
pub const EX_UNAVAILABLE: i32 = 69;

/// value: 74 <br>
/// An error occurred while doing I/O on some file.
pub const EX_IOERR: i32 = 74;

/// value: 75 <br>
/// Temporary failure, indicating something that is not really an error. Used when the transfer program exits unsuccessfully; the run may be reattempted.
pub const EX_TEMPFAIL: i32 = 75;

/// value: 78 <br>
/// Something was found in an unconfigured or misconfigured state.
pub const EX_CONFIG: i32 = 78;
