//! Workspace boundary enforcement
//!
//! Every request is scoped to one workspace root. A target path is joined
//! to the root if relative, canonicalized, and rejected before any file
//! content is touched when the canonical result falls outside the root.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Create a guard for the given workspace root. The root must exist.
    pub fn new(workspace_root: &Path) -> Result<Self> {
        let root = workspace_root.canonicalize().with_context(|| {
            format!(
                "Workspace root does not exist: {}",
                workspace_root.display()
            )
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a caller-supplied path against the workspace root.
    ///
    /// The parent directory is canonicalized (the target file itself may
    /// not exist yet, which is reported later as a missing file rather
    /// than an escape). Any result outside the root is rejected here,
    /// before the target is ever read.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let candidate = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };

        let file_name = candidate
            .file_name()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Path escapes workspace root: {} is not a file path",
                    path.display()
                )
            })?
            .to_os_string();

        let parent = candidate.parent().unwrap_or(Path::new("."));
        let canonical_parent = parent.canonicalize().with_context(|| {
            format!("Directory does not exist: {}", parent.display())
        })?;

        let resolved = canonical_parent.join(file_name);
        if !resolved.starts_with(&self.root) {
            anyhow::bail!(
                "Path escapes workspace root: {} resolves outside {}",
                path.display(),
                self.root.display()
            );
        }

        Ok(resolved)
    }
}
