//! Recursive directory walk

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::output::NameLookup;
use crate::status::AccessError;

use super::Lister;
use super::classify::{FileKind, is_pseudo_dir};

/// Entries the directory reader never yields.
const PSEUDO_DIRS: [&str; 2] = [".", ".."];

impl<W: Write, E: Write, L: NameLookup> Lister<W, E, L> {
    /// List the contents of `dir`, descending into subdirectories when the
    /// listing is recursive.
    ///
    /// Entries come in reader order. Failures on single entries are reported
    /// and the walk goes on with the next one.
    pub fn walk(&mut self, dir: &Path) -> io::Result<()> {
        let reader = match fs::read_dir(dir) {
            Ok(reader) => reader,
            Err(e) => {
                self.reporter.report(&AccessError::new("cannot access", dir, e));
                return Ok(());
            }
        };

        if self.config.show_hidden {
            for name in PSEUDO_DIRS {
                self.visit(dir, OsStr::new(name), FileKind::Directory)?;
            }
        }

        for item in reader {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    self.reporter
                        .report(&AccessError::new("cannot read entry in", dir, e));
                    continue;
                }
            };

            let name = entry.file_name();
            if is_hidden(&name) && !self.config.show_hidden {
                continue;
            }

            // Type of the entry itself; links are not followed here.
            let kind = match entry.file_type() {
                Ok(ft) => FileKind::from_file_type(ft),
                Err(e) => {
                    let path = entry_path(dir, &name);
                    self.reporter
                        .report(&AccessError::new("cannot access", path, e));
                    continue;
                }
            };
            self.visit(dir, &name, kind)?;
        }
        Ok(())
    }

    fn visit(&mut self, dir: &Path, name: &OsStr, kind: FileKind) -> io::Result<()> {
        let full_path = entry_path(dir, name);
        match kind {
            FileKind::Directory => {
                self.list_entry(&full_path, name)?;
                if self.config.recursive && !is_pseudo_dir(name) {
                    self.descend(&full_path)?;
                }
            }
            FileKind::Regular => self.list_entry(&full_path, name)?,
            FileKind::Other => {
                debug!("skipping {}: not a file or directory", full_path.display());
            }
        }
        Ok(())
    }

    fn descend(&mut self, dir: &Path) -> io::Result<()> {
        debug!("descending into {}", dir.display());
        if self.config.count_only {
            return self.walk(dir);
        }
        writeln!(self.out)?;
        self.write_header(dir)?;
        self.walk(dir)?;
        writeln!(self.out)
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.as_bytes().first() == Some(&b'.')
}

/// `dir + "/" + name`, without any normalization of `dir`.
fn entry_path(dir: &Path, name: &OsStr) -> PathBuf {
    let dir = dir.as_os_str();
    let mut full = OsString::with_capacity(dir.len() + 1 + name.len());
    full.push(dir);
    full.push("/");
    full.push(name);
    PathBuf::from(full)
}
