//! Replacement and insertion planners
//!
//! Both planners splice one mutable line buffer, applying operations in
//! descending line order. A splice only moves positions at or after its
//! own start line, so every not-yet-applied operation (which targets a
//! strictly lower line) keeps valid coordinates. Validation has already
//! run; the planners never reject.

use crate::document::Document;
use crate::request::{InsertionOp, ReplacementOp};

/// Apply verified replacement operations, returning the spliced document
/// and one log entry per operation in ascending line order.
pub fn apply_replacements(document: &Document, ops: &[ReplacementOp]) -> (Document, Vec<String>) {
    let mut sorted: Vec<&ReplacementOp> = ops.iter().collect();
    sorted.sort_by(|a, b| b.start_line.cmp(&a.start_line));

    let mut lines: Vec<String> = document.lines().to_vec();
    let mut log = Vec::with_capacity(sorted.len());

    for op in &sorted {
        let removed = op.end_line - op.start_line + 1;
        let new_lines: Vec<String> = op.new_text.split('\n').map(String::from).collect();
        let inserted = new_lines.len();

        lines.splice(op.start_line - 1..op.end_line, new_lines);

        log.push(format!(
            "Replaced {} lines ({}-{}) with {} lines",
            removed, op.start_line, op.end_line, inserted
        ));
    }

    // Applied highest-first; report in file order.
    log.reverse();
    (Document::from_lines(lines), log)
}

/// Apply insertion operations, returning the spliced document and one log
/// entry per operation in ascending line order.
pub fn apply_insertions(document: &Document, ops: &[InsertionOp]) -> (Document, Vec<String>) {
    let mut sorted: Vec<&InsertionOp> = ops.iter().collect();
    sorted.sort_by(|a, b| b.after_line.cmp(&a.after_line));

    let mut lines: Vec<String> = document.lines().to_vec();
    let mut log = Vec::with_capacity(sorted.len());

    for op in &sorted {
        let new_lines: Vec<String> = op.text.split('\n').map(String::from).collect();
        let inserted = new_lines.len();

        lines.splice(op.after_line..op.after_line, new_lines);

        log.push(format!(
            "Inserted {} lines after line {}",
            inserted, op.after_line
        ));
    }

    log.reverse();
    (Document::from_lines(lines), log)
}
