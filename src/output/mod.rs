//! Entry rendering
//!
//! Turns one resolved entry into its output line, either the bare name or the
//! long form:
//!
//! ```text
//! -rw-r--r-- 1 alice staff 4096 Mar  5 14:07 notes.txt
//! ```

mod long;
mod time;

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::listing::{ResolvedEntry, is_directory, is_pseudo_dir};
use crate::status::RunStatus;

pub use long::{NameLookup, SystemNames, group_field, owner_field, permission_string};
pub use time::{RECENT_WINDOW_SECS, format_mtime, format_mtime_in};

/// Renders entries as listing lines.
#[derive(Debug, Clone, Default)]
pub struct EntryFormatter<L: NameLookup = SystemNames> {
    names: L,
}

impl EntryFormatter<SystemNames> {
    pub fn new() -> Self {
        Self { names: SystemNames }
    }
}

impl<L: NameLookup> EntryFormatter<L> {
    pub fn with_lookup(names: L) -> Self {
        Self { names }
    }

    /// Render one entry.
    ///
    /// `full_path` is used for the directory probe, `name` is what gets
    /// printed, byte for byte. Failed owner or group lookups are folded into
    /// `status`.
    pub fn render(
        &self,
        full_path: &Path,
        name: &OsStr,
        entry: &ResolvedEntry,
        long_format: bool,
        status: &mut RunStatus,
    ) -> Vec<u8> {
        let mut line = if long_format {
            format!(
                "{} {} {} {} {} {} ",
                permission_string(entry.kind, entry.mode),
                entry.nlink,
                owner_field(&self.names, entry.uid, status),
                group_field(&self.names, entry.gid, status),
                entry.size,
                format_mtime(entry.mtime),
            )
            .into_bytes()
        } else {
            Vec::with_capacity(name.len() + 1)
        };
        line.extend_from_slice(name.as_bytes());
        if !is_pseudo_dir(name) && is_directory(full_path) {
            line.push(b'/');
        }
        line
    }
}
