//! Listing engine
//!
//! A [`Lister`] is one listing run. It owns the output stream, the error
//! reporter with its accumulated [`RunStatus`], and the entry counter used in
//! count-only mode. The driver ([`Lister::list_roots`]) handles the
//! command-line roots; the recursive walk lives in `walker`.

mod classify;
mod config;
mod walker;

use std::ffi::OsStr;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use log::trace;

use crate::output::{EntryFormatter, NameLookup, SystemNames};
use crate::status::{Reporter, RunStatus};

pub use classify::{FileKind, ResolvedEntry, is_directory, is_pseudo_dir, resolve};
pub use config::ListingConfig;

/// One listing run over any number of roots.
pub struct Lister<W: Write, E: Write, L: NameLookup = SystemNames> {
    config: ListingConfig,
    formatter: EntryFormatter<L>,
    out: W,
    reporter: Reporter<E>,
    file_count: usize,
}

impl<W: Write, E: Write> Lister<W, E, SystemNames> {
    /// Listing lines go to `out`, error messages to `err`.
    pub fn new(config: ListingConfig, out: W, err: E) -> Self {
        Self::with_formatter(config, EntryFormatter::new(), out, err)
    }
}

impl<W: Write, E: Write, L: NameLookup> Lister<W, E, L> {
    pub fn with_formatter(
        config: ListingConfig,
        formatter: EntryFormatter<L>,
        out: W,
        err: E,
    ) -> Self {
        Self {
            config: config.normalized(),
            formatter,
            out,
            reporter: Reporter::new(err),
            file_count: 0,
        }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Entries counted so far (count-only mode).
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn status(&self) -> RunStatus {
        self.reporter.status()
    }

    /// Give back the output and error streams.
    pub fn into_parts(self) -> (W, E) {
        (self.out, self.reporter.into_sink())
    }

    /// List every root in order, or `.` when there are none.
    ///
    /// Roots that cannot be accessed are reported and skipped. In count-only
    /// mode the total is printed last. Returns the accumulated status; an
    /// `Err` means the output stream itself failed.
    pub fn list_roots<P: AsRef<Path>>(&mut self, roots: &[P]) -> io::Result<RunStatus> {
        if roots.is_empty() {
            self.walk(Path::new("."))?;
        } else {
            let headers = roots.len() > 1 || self.config.recursive;
            for root in roots {
                self.list_root(root.as_ref(), headers)?;
            }
        }

        if self.config.count_only {
            writeln!(self.out, "{}", self.file_count)?;
        }
        self.out.flush()?;
        Ok(self.status())
    }

    fn list_root(&mut self, root: &Path, headers: bool) -> io::Result<()> {
        if let Err(err) = resolve(root) {
            self.reporter.report(&err);
            return Ok(());
        }
        if is_directory(root) {
            if headers && !self.config.count_only {
                self.write_header(root)?;
            }
            self.walk(root)
        } else {
            self.list_entry(root, root.as_os_str())
        }
    }

    /// Print (or count) a single entry.
    ///
    /// The entry is looked up again here; if it vanished or became
    /// inaccessible since it was enumerated, the failure is reported and the
    /// entry is skipped.
    fn list_entry(&mut self, full_path: &Path, name: &OsStr) -> io::Result<()> {
        let entry = match resolve(full_path) {
            Ok(entry) => entry,
            Err(err) => {
                self.reporter.report(&err);
                return Ok(());
            }
        };

        if self.config.count_only {
            self.file_count += 1;
            return Ok(());
        }

        let mut lookups = RunStatus::empty();
        let line = self.formatter.render(
            full_path,
            name,
            &entry,
            self.config.long_format,
            &mut lookups,
        );
        self.reporter.merge(lookups);
        trace!("listed {}", full_path.display());
        self.out.write_all(&line)?;
        self.out.write_all(b"\n")
    }

    /// `<dir>:` with the path bytes as given.
    fn write_header(&mut self, dir: &Path) -> io::Result<()> {
        self.out.write_all(dir.as_os_str().as_bytes())?;
        self.out.write_all(b":\n")
    }
}

/// List `roots` with `config`, writing to the given streams.
pub fn list<P, W, E>(config: ListingConfig, roots: &[P], out: W, err: E) -> io::Result<RunStatus>
where
    P: AsRef<Path>,
    W: Write,
    E: Write,
{
    Lister::new(config, out, err).list_roots(roots)
}
