//! Patch engine orchestration
//!
//! One request flows through guard -> load -> validate -> plan ->
//! (backup ->) write, synchronously on the calling thread. The write is
//! the final step and goes through a temp file in the target's directory
//! followed by an atomic rename, so a failed write never leaves a
//! truncated file behind.
//!
//! The target file is not locked; an external writer that modifies the
//! file between load and write is silently clobbered. The intended
//! caller issues one edit at a time per file.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::backup;
use crate::document::Document;
use crate::path_guard::PathGuard;
use crate::planner;
use crate::request::{PatchOutcome, PatchRequest};
use crate::validate::{self, ValidatedOps};

pub struct PatchEngine {
    guard: PathGuard,
}

/// Outcome plus the full before/after texts, so callers can render a
/// preview without re-reading the (possibly already rewritten) file.
#[derive(Debug)]
pub struct PatchReport {
    pub outcome: PatchOutcome,
    pub original_text: String,
    pub modified_text: String,
}

impl PatchEngine {
    /// Create an engine scoped to one workspace root. Multiple engines
    /// with different roots can coexist; the root is not process-global.
    pub fn new(workspace_root: &Path) -> Result<Self> {
        Ok(Self {
            guard: PathGuard::new(workspace_root)?,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        self.guard.root()
    }

    /// Apply one patch request and report what changed.
    ///
    /// Dry-run requests run through validation and planning identically
    /// but skip both backup and write; the reported counts still reflect
    /// what would have resulted.
    pub fn apply(&self, request: &PatchRequest) -> Result<PatchReport> {
        let resolved = self.guard.resolve(Path::new(&request.path))?;

        // Shape problems (empty or mixed op lists) are caller errors that
        // don't warrant reading the target at all.
        validate::validate_shape(request)?;

        let document = Document::load(&resolved)?;
        let validated = validate::validate(request, &document)?;
        let (planned, operations_log) = match &validated {
            ValidatedOps::Replacements(ops) => planner::apply_replacements(&document, ops),
            ValidatedOps::Insertions(ops) => planner::apply_insertions(&document, ops),
        };

        let original_text = document.reconstruct();
        let modified_text = planned.reconstruct();

        let mut backup_path: Option<PathBuf> = None;
        if !request.dry_run {
            if request.create_backup {
                backup_path = Some(backup::create_backup(&resolved)?);
            }
            write_atomic(&resolved, &modified_text)?;
        }

        info!(
            command = %request.command,
            path = %resolved.display(),
            operations = operations_log.len(),
            dry_run = request.dry_run,
            "patch request completed"
        );

        Ok(PatchReport {
            outcome: PatchOutcome {
                command: request.command,
                path: request.path.clone(),
                resolved_path: resolved,
                operations_log,
                original_line_count: document.line_count(),
                modified_line_count: planned.line_count(),
                dry_run: request.dry_run,
                backup_created: backup_path.is_some(),
                backup_path,
            },
            original_text,
            modified_text,
        })
    }
}

/// Write full content to a temp file in the target's directory, then
/// rename over the target.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    temp_file
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist write to {}", path.display()))?;

    Ok(())
}
