//! Request validation
//!
//! All preconditions are checked here, before any planning or file
//! mutation. A request that passes validation is guaranteed to splice
//! cleanly: line ranges are in bounds, claimed content matches the
//! document byte-for-byte, and replacement ranges are disjoint.

use anyhow::Result;

use crate::document::Document;
use crate::request::{InsertionOp, PatchCommand, PatchRequest, ReplacementOp};

/// Operations that survived validation, ready for the planners.
#[derive(Debug, Clone)]
pub enum ValidatedOps {
    Replacements(Vec<ReplacementOp>),
    Insertions(Vec<InsertionOp>),
}

/// Structural checks that need no document: the op list matches the
/// command kind and is non-empty. Run before the target file is read.
pub fn validate_shape(request: &PatchRequest) -> Result<()> {
    match request.command {
        PatchCommand::Replace => {
            if !request.insertions.is_empty() {
                anyhow::bail!("A replace request must not carry insertion operations");
            }
            if request.replacements.is_empty() {
                anyhow::bail!("No valid operations provided: replace request has no replacements");
            }
        }
        PatchCommand::Insert => {
            if !request.replacements.is_empty() {
                anyhow::bail!("An insert request must not carry replacement operations");
            }
            if request.insertions.is_empty() {
                anyhow::bail!("No valid operations provided: insert request has no insertions");
            }
        }
    }
    Ok(())
}

pub fn validate(request: &PatchRequest, document: &Document) -> Result<ValidatedOps> {
    validate_shape(request)?;
    match request.command {
        PatchCommand::Replace => {
            for op in &request.replacements {
                validate_replacement(op, document)?;
            }
            check_overlaps(&request.replacements)?;
            Ok(ValidatedOps::Replacements(request.replacements.clone()))
        }
        PatchCommand::Insert => {
            for op in &request.insertions {
                validate_insertion(op, document)?;
            }
            Ok(ValidatedOps::Insertions(request.insertions.clone()))
        }
    }
}

fn validate_replacement(op: &ReplacementOp, document: &Document) -> Result<()> {
    let line_count = document.line_count();
    if op.start_line < 1 || op.end_line > line_count || op.start_line > op.end_line {
        anyhow::bail!(
            "Invalid line range {}-{}: file has {} lines",
            op.start_line,
            op.end_line,
            line_count
        );
    }

    let found = document.slice_text(op.start_line, op.end_line);
    if found != op.old_text {
        anyhow::bail!(
            "Content mismatch at lines {}-{}: expected {:?}, found {:?}",
            op.start_line,
            op.end_line,
            op.old_text,
            found
        );
    }

    Ok(())
}

fn validate_insertion(op: &InsertionOp, document: &Document) -> Result<()> {
    let line_count = document.line_count();
    if op.after_line > line_count {
        anyhow::bail!(
            "Invalid line range: cannot insert after line {}, file has {} lines",
            op.after_line,
            line_count
        );
    }
    Ok(())
}

/// Disjointness check for replacement ranges. Descending-order application
/// is only safe when ranges don't touch each other; overlapping ranges in
/// one request are a caller error, not something to apply in some order.
fn check_overlaps(ops: &[ReplacementOp]) -> Result<()> {
    let mut sorted: Vec<&ReplacementOp> = ops.iter().collect();
    sorted.sort_by_key(|op| op.start_line);

    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.start_line <= prev.end_line {
            anyhow::bail!(
                "Overlapping operations: lines {}-{} and {}-{} target the same region",
                prev.start_line,
                prev.end_line,
                next.start_line,
                next.end_line
            );
        }
    }
    Ok(())
}
