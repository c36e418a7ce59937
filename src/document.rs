//! Line-indexed document model
//!
//! A document is the raw file text split on `\n`. Line references are
//! 1-indexed everywhere outside this module. A file that ends with a
//! newline splits into a final empty line; `reconstruct` joins the lines
//! back so load -> reconstruct is byte-identical.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Load a document from disk, splitting on `\n`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("File not found or unreadable: {}", path.display()))?;
        Ok(Self::from_text(&content))
    }

    pub fn from_text(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(String::from).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Exact inverse of the load-time split. Used for both mismatch
    /// diagnostics and the final write.
    pub fn reconstruct(&self) -> String {
        self.lines.join("\n")
    }

    /// Join a 1-indexed inclusive line range with newlines.
    ///
    /// Callers must have range-checked `start` and `end` already.
    pub fn slice_text(&self, start: usize, end: usize) -> String {
        self.lines[start - 1..end].join("\n")
    }
}
