//! Patch request and outcome data model
//!
//! Requests arrive as JSON from an automation agent (or are assembled from
//! CLI flags). A request carries exactly one command kind; replacement and
//! insertion operations are never mixed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchCommand {
    Replace,
    Insert,
}

impl std::fmt::Display for PatchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchCommand::Replace => write!(f, "replace"),
            PatchCommand::Insert => write!(f, "insert"),
        }
    }
}

/// An edit that asserts expected current content at a 1-indexed inclusive
/// line range and supplies replacement content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementOp {
    pub old_text: String,
    pub new_text: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// An edit that adds new content after a specified line without removing
/// existing content. `after_line = 0` inserts before the first line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionOp {
    pub after_line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchRequest {
    pub command: PatchCommand,

    /// Relative to the workspace root, or absolute but contained in it.
    pub path: String,

    #[serde(default = "default_create_backup")]
    pub create_backup: bool,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub replacements: Vec<ReplacementOp>,

    #[serde(default)]
    pub insertions: Vec<InsertionOp>,
}

fn default_create_backup() -> bool {
    true
}

impl PatchRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse patch request JSON")
    }

    /// Single-operation replace request, used by the CLI convenience form.
    pub fn replace_single(path: String, op: ReplacementOp) -> Self {
        Self {
            command: PatchCommand::Replace,
            path,
            create_backup: true,
            dry_run: false,
            replacements: vec![op],
            insertions: Vec::new(),
        }
    }

    /// Single-operation insert request, used by the CLI convenience form.
    pub fn insert_single(path: String, op: InsertionOp) -> Self {
        Self {
            command: PatchCommand::Insert,
            path,
            create_backup: true,
            dry_run: false,
            replacements: Vec::new(),
            insertions: vec![op],
        }
    }
}

/// Structured result of one request, serialized back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchOutcome {
    pub command: PatchCommand,
    pub path: String,
    pub resolved_path: PathBuf,
    pub operations_log: Vec<String>,
    pub original_line_count: usize,
    pub modified_line_count: usize,
    pub dry_run: bool,
    pub backup_created: bool,
    pub backup_path: Option<PathBuf>,
}

impl PatchOutcome {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize patch outcome")
    }
}
