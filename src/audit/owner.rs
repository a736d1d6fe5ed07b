//! Owner and permission lookups.

use crate::utils::config::UNKNOWN_OWNER;
use std::fs::Metadata;

/// Resolved owner of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Login name
    pub name: String,

    /// Full name from the GECOS field
    pub full_name: String,
}

impl Owner {
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_OWNER.to_string(),
            full_name: UNKNOWN_OWNER.to_string(),
        }
    }
}

/// Look up the owner of `stat`, falling back to `Unknown`
#[cfg(unix)]
pub fn lookup_owner(stat: &Metadata) -> Owner {
    use nix::unistd::{Uid, User};
    use std::os::unix::fs::MetadataExt;

    match User::from_uid(Uid::from_raw(stat.uid())) {
        Ok(Some(user)) => {
            let gecos = user.gecos.to_string_lossy();
            let full_name = gecos.split(',').next().unwrap_or_default().trim();
            Owner {
                full_name: if full_name.is_empty() {
                    user.name.clone()
                } else {
                    full_name.to_string()
                },
                name: user.name,
            }
        }
        Ok(None) => {
            log::debug!("No passwd entry for uid {}", stat.uid());
            Owner::unknown()
        }
        Err(e) => {
            log::warn!("Owner lookup for uid {} failed: {}", stat.uid(), e);
            Owner::unknown()
        }
    }
}

#[cfg(not(unix))]
pub fn lookup_owner(_stat: &Metadata) -> Owner {
    Owner::unknown()
}

/// `ls -l` style permission string, e.g. `drwxr-x---`
#[cfg(unix)]
pub fn permission_string(stat: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format_mode(stat.permissions().mode(), stat.is_dir())
}

#[cfg(not(unix))]
pub fn permission_string(stat: &Metadata) -> String {
    let mode = if stat.permissions().readonly() { 0o444 } else { 0o644 };
    format_mode(mode, stat.is_dir())
}

/// Render the low nine permission bits of `mode`
pub fn format_mode(mode: u32, is_dir: bool) -> String {
    const BITS: [(u32, char); 9] = [
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

    let mut out = String::with_capacity(10);
    out.push(if is_dir { 'd' } else { '-' });
    for (bit, symbol) in BITS {
        out.push(if mode & bit != 0 { symbol } else { '-' });
    }
    out
}
