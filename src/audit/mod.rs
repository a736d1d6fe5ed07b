//! Filesystem audit helpers.
//!
//! Thin wrappers over stat, passwd lookups and directory walks used by
//! the `audit`, `whose`, `size` and `view` commands.

pub mod directory;
pub mod owner;
pub mod size;

pub use directory::{owner_full_name, DirectoryAudit};
pub use owner::{format_mode, lookup_owner, permission_string, Owner};
pub use size::{directory_size, format_bytes};
