//! Path classification: metadata lookup and the directory probe

use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::status::AccessError;

/// Coarse file type as reported by the metadata lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Other,
}

impl FileKind {
    pub fn from_file_type(ft: fs::FileType) -> Self {
        if ft.is_file() {
            FileKind::Regular
        } else if ft.is_dir() {
            FileKind::Directory
        } else {
            FileKind::Other
        }
    }
}

/// Metadata of one path, queried fresh for every listing.
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub kind: FileKind,
    /// Permission bits only (`st_mode & 0o777`)
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    /// Modification time in seconds since the Unix epoch
    pub mtime: i64,
}

impl ResolvedEntry {
    fn from_metadata(path: &Path, meta: &fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| path.as_os_str().to_os_string());
        Self {
            path: path.to_path_buf(),
            name,
            kind: FileKind::from_file_type(meta.file_type()),
            mode: meta.mode() & 0o777,
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            mtime: meta.mtime(),
        }
    }
}

/// Look up the metadata of `path`, following symlinks.
///
/// Failures are classified but not printed; the caller reports them.
pub fn resolve(path: &Path) -> Result<ResolvedEntry, AccessError> {
    fs::metadata(path)
        .map(|meta| ResolvedEntry::from_metadata(path, &meta))
        .map_err(|e| AccessError::new("cannot access", path, e))
}

/// Whether `path` can be opened as a directory stream.
///
/// This is an operational check rather than a mode-bit test. Only meaningful
/// once [`resolve`] succeeded for the same path.
pub fn is_directory(path: &Path) -> bool {
    fs::read_dir(path).is_ok()
}

/// `.` and `..`: listable, never descended into.
pub fn is_pseudo_dir(name: &OsStr) -> bool {
    name == "." || name == ".."
}
