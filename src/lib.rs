//! dirlist - list directory contents and file metadata

pub mod listing;
pub mod output;
pub mod status;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use listing::{FileKind, Lister, ListingConfig, ResolvedEntry, list};
pub use output::EntryFormatter;
pub use status::{AccessError, FailureKind, RunStatus};
