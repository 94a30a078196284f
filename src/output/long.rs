//! Long-format fields: permission string and owner names

use uzers::{get_group_by_gid, get_user_by_uid};

use crate::listing::FileKind;
use crate::status::{FailureKind, RunStatus};

/// Owner/group bits in display order.
const PERMISSION_BITS: [(u32, char); 9] = [
    (0o400, 'r'),
    (0o200, 'w'),
    (0o100, 'x'),
    (0o040, 'r'),
    (0o020, 'w'),
    (0o010, 'x'),
    (0o004, 'r'),
    (0o002, 'w'),
    (0o001, 'x'),
];

/// Build the 10-character `drwxr-xr-x` style string.
pub fn permission_string(kind: FileKind, mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(match kind {
        FileKind::Regular => '-',
        FileKind::Directory => 'd',
        FileKind::Other => '?',
    });
    for (mask, ch) in PERMISSION_BITS {
        out.push(if mode & mask != 0 { ch } else { '-' });
    }
    out
}

/// Resolves numeric ids to account names.
pub trait NameLookup {
    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
}

/// Lookup through the system user and group databases.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNames;

impl NameLookup for SystemNames {
    fn user_name(&self, uid: u32) -> Option<String> {
        get_user_by_uid(uid).map(|user| user.name().to_string_lossy().into_owned())
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        get_group_by_gid(gid).map(|group| group.name().to_string_lossy().into_owned())
    }
}

/// The user name for `uid`, or the number itself when it has no name.
///
/// A miss is still a failure of the run and is recorded in `status`.
pub fn owner_field(lookup: &impl NameLookup, uid: u32, status: &mut RunStatus) -> String {
    lookup.user_name(uid).unwrap_or_else(|| {
        *status |= RunStatus::for_failure(FailureKind::Other);
        uid.to_string()
    })
}

/// Same as [`owner_field`] for groups.
pub fn group_field(lookup: &impl NameLookup, gid: u32, status: &mut RunStatus) -> String {
    lookup.group_name(gid).unwrap_or_else(|| {
        *status |= RunStatus::for_failure(FailureKind::Other);
        gid.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoNames;

    impl NameLookup for NoNames {
        fn user_name(&self, _uid: u32) -> Option<String> {
            None
        }
        fn group_name(&self, _gid: u32) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_permission_string_common_modes() {
        assert_eq!(permission_string(FileKind::Regular, 0o644), "-rw-r--r--");
        assert_eq!(permission_string(FileKind::Directory, 0o755), "drwxr-xr-x");
        assert_eq!(permission_string(FileKind::Other, 0o777), "?rwxrwxrwx");
        assert_eq!(permission_string(FileKind::Regular, 0o000), "----------");
        assert_eq!(permission_string(FileKind::Regular, 0o421), "-r---w---x");
    }

    #[test]
    fn test_permission_string_ignores_high_bits() {
        // setuid/setgid/sticky have no column of their own
        assert_eq!(permission_string(FileKind::Regular, 0o4755), "-rwxr-xr-x");
    }

    #[test]
    fn test_permission_string_always_ten_chars() {
        for mode in 0..=0o777 {
            for kind in [FileKind::Regular, FileKind::Directory, FileKind::Other] {
                let s = permission_string(kind, mode);
                assert_eq!(s.len(), 10, "mode {:o}", mode);
                for (i, (mask, ch)) in PERMISSION_BITS.iter().enumerate() {
                    let got = s.as_bytes()[i + 1] as char;
                    let expected = if mode & mask != 0 { *ch } else { '-' };
                    assert_eq!(got, expected, "mode {:o} position {}", mode, i + 1);
                }
            }
        }
    }

    #[test]
    fn test_name_fallback_flags_other() {
        let mut status = RunStatus::empty();
        assert_eq!(owner_field(&NoNames, 4242, &mut status), "4242");
        assert_eq!(status, RunStatus::GENERIC | RunStatus::OTHER);

        let mut status = RunStatus::empty();
        assert_eq!(group_field(&NoNames, 77, &mut status), "77");
        assert_eq!(status, RunStatus::GENERIC | RunStatus::OTHER);
    }

    #[test]
    fn test_system_names_match_user_database() {
        let uid = uzers::get_current_uid();
        let mut status = RunStatus::empty();
        let field = owner_field(&SystemNames, uid, &mut status);
        match get_user_by_uid(uid) {
            Some(user) => {
                assert_eq!(field, user.name().to_string_lossy());
                assert!(status.is_empty());
            }
            None => {
                assert_eq!(field, uid.to_string());
                assert_eq!(status, RunStatus::GENERIC | RunStatus::OTHER);
            }
        }
    }
}
