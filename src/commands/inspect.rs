//! Single-directory inspection commands: view, log, whose, audit, size.

use crate::audit::{directory_size, format_bytes, owner_full_name, DirectoryAudit};
use crate::parser::DmpMetadata;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Print the DMP metadata of a directory
pub fn execute_view(directory: &Path) -> Result<()> {
    let metadata = load_checked(directory)?;

    println!("Metadata for {}", metadata.path.display());
    println!();

    let width = metadata
        .fields
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, value) in &metadata.fields {
        println!("  {:>width$}  {}", name, value, width = width);
    }

    if !metadata.content.is_empty() {
        println!();
        println!("{}", metadata.content);
    }

    if !metadata.logs.is_empty() {
        println!();
        for entry in &metadata.logs {
            println!("{}", entry);
        }
    }

    Ok(())
}

/// Append a change-log entry to a directory's README
pub fn execute_log(path: &Path, description: &str) -> Result<()> {
    if description.trim().is_empty() {
        anyhow::bail!("Log description cannot be empty");
    }

    let mut metadata = load_checked(path).context("No log entry added")?;
    metadata.log_change(description.trim());
    metadata
        .write_to_file(None)
        .with_context(|| format!("Failed to update {}", metadata.readme.display()))?;

    info!("✓ Logged change to {}", metadata.readme.display());
    Ok(())
}

/// Print the full name of the owner of a file or directory
pub fn execute_whose(path: &Path) -> Result<()> {
    let owner = owner_full_name(path)
        .with_context(|| format!("Failed to resolve owner of {}", path.display()))?;

    println!("The owner of {} is {}", path.display(), owner);
    Ok(())
}

/// Print owner, permissions and timestamps of a directory
pub fn execute_audit(path: &Path) -> Result<()> {
    let audit = DirectoryAudit::from_path(path)
        .with_context(|| format!("Failed to audit {}", path.display()))?;

    println!("{}", audit);
    Ok(())
}

/// Print the total size of a DMP directory
///
/// # Returns
/// Size in bytes of the directory the README documents
pub fn execute_size(path: &Path) -> Result<u64> {
    let metadata = load_checked(path)?;
    let bytes = directory_size(&metadata.path)
        .with_context(|| format!("Failed to measure {}", metadata.path.display()))?;

    println!("The size of {} is {}", path.display(), format_bytes(bytes));
    Ok(bytes)
}

fn load_checked(path: &Path) -> Result<DmpMetadata> {
    let metadata = DmpMetadata::from_path(path)
        .with_context(|| format!("Failed to read DMP metadata from {}", path.display()))?;
    metadata.check_fields()?;
    Ok(metadata)
}
