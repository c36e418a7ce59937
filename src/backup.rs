//! Pre-write backups
//!
//! Before a destructive write, the original file is copied byte-for-byte
//! to a sibling path carrying a `.backup.` marker and a timestamp token.
//! A failed backup aborts the whole request; the destructive write never
//! proceeds without a successful backup when one was requested.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Timestamp token with millisecond precision plus a short random suffix,
/// so two backups of the same file in the same millisecond still collide
/// on nothing.
fn backup_token() -> String {
    format!(
        "{}-{}",
        Utc::now().format("%Y%m%d-%H%M%S%3f"),
        Uuid::new_v4().to_string().split_at(8).0
    )
}

/// Copy `path` to a timestamped sibling and return the backup path.
pub fn create_backup(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?;

    let backup_name = format!("{}.backup.{}", file_name.to_string_lossy(), backup_token());
    let backup_path = path.with_file_name(backup_name);

    fs::copy(path, &backup_path)
        .with_context(|| format!("Failed to write backup for: {}", path.display()))?;

    Ok(backup_path)
}
