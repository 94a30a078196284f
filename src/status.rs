//! Run status bits and error reporting
//!
//! Every failure met while listing is reported where it happens and folded
//! into a [`RunStatus`]. Nothing here aborts the listing; the accumulated bits
//! become the process exit status.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use thiserror::Error;

/// Program name used as the prefix of error messages.
pub const PROGRAM: &str = "dirlist";

bitflags! {
    /// Accumulated failure bits for one run. Zero means full success.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RunStatus: u8 {
        /// A path or entry did not exist.
        const NOT_FOUND     = 0b0000_1000;
        /// Permission was denied.
        const ACCESS_DENIED = 0b0001_0000;
        /// Any other failure, including user/group name lookups.
        const OTHER         = 0b0010_0000;
        /// Set alongside every other bit.
        const GENERIC       = 0b0100_0000;
    }
}

impl RunStatus {
    /// Status bits for one failure of the given kind.
    pub fn for_failure(kind: FailureKind) -> Self {
        let specific = match kind {
            FailureKind::AccessDenied => RunStatus::ACCESS_DENIED,
            FailureKind::NotFound => RunStatus::NOT_FOUND,
            FailureKind::Other => RunStatus::OTHER,
        };
        RunStatus::GENERIC | specific
    }

    /// The value handed to `process::exit`.
    pub fn exit_code(self) -> i32 {
        i32::from(self.bits())
    }
}

/// Classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    AccessDenied,
    NotFound,
    Other,
}

impl From<io::ErrorKind> for FailureKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::PermissionDenied => FailureKind::AccessDenied,
            io::ErrorKind::NotFound => FailureKind::NotFound,
            _ => FailureKind::Other,
        }
    }
}

/// A failed filesystem access, with what was attempted and on which path.
#[derive(Debug, Error)]
#[error("{action} {path}: {source}", path = .path.display())]
pub struct AccessError {
    action: &'static str,
    path: PathBuf,
    kind: FailureKind,
    #[source]
    source: io::Error,
}

impl AccessError {
    pub fn new(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            action,
            path: path.into(),
            kind: FailureKind::from(source.kind()),
            source,
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes error messages and accumulates the run status.
pub struct Reporter<E: Write> {
    sink: E,
    status: RunStatus,
}

impl<E: Write> Reporter<E> {
    pub fn new(sink: E) -> Self {
        Self {
            sink,
            status: RunStatus::empty(),
        }
    }

    /// Print a message for `err` and record its bits.
    ///
    /// A failure to write the message is ignored; the bits are recorded
    /// either way and the listing goes on.
    pub fn report(&mut self, err: &AccessError) {
        self.flag(err.kind());
        let _ = writeln!(self.sink, "{}: {}", PROGRAM, err);
    }

    /// Record a failure without printing anything.
    pub fn flag(&mut self, kind: FailureKind) {
        self.status |= RunStatus::for_failure(kind);
    }

    /// Fold in bits recorded elsewhere, such as name lookup misses.
    pub fn merge(&mut self, status: RunStatus) {
        self.status |= status;
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn into_sink(self) -> E {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_values() {
        assert_eq!(RunStatus::NOT_FOUND.bits(), 1 << 3);
        assert_eq!(RunStatus::ACCESS_DENIED.bits(), 1 << 4);
        assert_eq!(RunStatus::OTHER.bits(), 1 << 5);
        assert_eq!(RunStatus::GENERIC.bits(), 1 << 6);
    }

    #[test]
    fn test_failure_sets_generic_and_one_specific_bit() {
        for kind in [
            FailureKind::AccessDenied,
            FailureKind::NotFound,
            FailureKind::Other,
        ] {
            let status = RunStatus::for_failure(kind);
            assert!(status.contains(RunStatus::GENERIC));
            let specific = status - RunStatus::GENERIC;
            assert_eq!(specific.bits().count_ones(), 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_classify_io_error_kinds() {
        assert_eq!(
            FailureKind::from(io::ErrorKind::PermissionDenied),
            FailureKind::AccessDenied
        );
        assert_eq!(
            FailureKind::from(io::ErrorKind::NotFound),
            FailureKind::NotFound
        );
        assert_eq!(
            FailureKind::from(io::ErrorKind::InvalidInput),
            FailureKind::Other
        );
    }

    #[test]
    fn test_reporter_accumulates_and_prints() {
        let mut reporter = Reporter::new(Vec::new());
        assert_eq!(reporter.status(), RunStatus::empty());

        let err = AccessError::new(
            "cannot access",
            "missing.txt",
            io::Error::from(io::ErrorKind::NotFound),
        );
        reporter.report(&err);
        reporter.flag(FailureKind::Other);

        let status = reporter.status();
        assert_eq!(
            status,
            RunStatus::GENERIC | RunStatus::NOT_FOUND | RunStatus::OTHER
        );
        assert_eq!(status.exit_code(), 64 + 8 + 32);

        let text = String::from_utf8(reporter.into_sink()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("dirlist: cannot access missing.txt: "));
    }

    #[test]
    fn test_permission_denied_sets_access_bit() {
        let mut reporter = Reporter::new(Vec::new());
        let err = AccessError::new(
            "cannot access",
            "locked",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.kind(), FailureKind::AccessDenied);

        reporter.report(&err);
        assert_eq!(
            reporter.status(),
            RunStatus::GENERIC | RunStatus::ACCESS_DENIED
        );
        assert_eq!(reporter.status().exit_code(), 80);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_unwritable_sink_still_records_status() {
        let mut reporter = Reporter::new(BrokenPipe);
        let err = AccessError::new(
            "cannot access",
            "gone",
            io::Error::from(io::ErrorKind::NotFound),
        );
        reporter.report(&err);
        assert_eq!(reporter.status(), RunStatus::GENERIC | RunStatus::NOT_FOUND);
    }
}
