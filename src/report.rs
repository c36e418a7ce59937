use crate::engine::PatchReport;
use colored::*;
use similar::{ChangeTag, TextDiff};

pub struct ResultReporter;

impl ResultReporter {
    /// Auto-detect if we should use colors
    fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        std::env::var("NO_COLOR").is_err()
    }

    /// Format the human-readable summary for one completed request.
    pub fn format_report(report: &PatchReport) -> String {
        let use_color = Self::should_use_color();
        let outcome = &report.outcome;
        let mut output = String::new();

        let header = outcome.resolved_path.display().to_string();
        if use_color {
            output.push_str(&format!("{}\n", header.bold().cyan()));
        } else {
            output.push_str(&format!("{}\n", header));
        }

        if outcome.dry_run {
            let banner = "DRY RUN - no changes written";
            if use_color {
                output.push_str(&format!("{}\n", banner.yellow().bold()));
            } else {
                output.push_str(&format!("{}\n", banner));
            }
        }

        for entry in &outcome.operations_log {
            output.push_str(&format!("  {}\n", entry));
        }

        output.push_str(&Self::format_line_diff(
            &report.original_text,
            &report.modified_text,
            use_color,
        ));

        output.push_str(&format!(
            "\nLines: {} -> {}\n",
            outcome.original_line_count, outcome.modified_line_count
        ));

        if outcome.backup_created {
            if let Some(backup_path) = &outcome.backup_path {
                output.push_str(&format!("Backup: {}\n", backup_path.display()));
            }
        }

        output
    }

    /// Line-level diff of the planned change, changed lines only.
    fn format_line_diff(original: &str, modified: &str, use_color: bool) -> String {
        let diff = TextDiff::from_lines(original, modified);
        let mut output = String::new();

        for change in diff.iter_all_changes() {
            let (indicator, line) = match change.tag() {
                ChangeTag::Delete => ("-", change.value()),
                ChangeTag::Insert => ("+", change.value()),
                ChangeTag::Equal => continue,
            };

            let text = line.strip_suffix('\n').unwrap_or(line);
            if use_color {
                let rendered = match change.tag() {
                    ChangeTag::Delete => format!("{} {}", indicator.red().bold(), text.red()),
                    ChangeTag::Insert => format!("{} {}", indicator.green().bold(), text.green()),
                    ChangeTag::Equal => unreachable!(),
                };
                output.push_str(&format!("  {}\n", rendered));
            } else {
                output.push_str(&format!("  {} {}\n", indicator, text));
            }
        }

        output
    }
}
