use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser)]
#[command(name = "linepatch")]
#[command(about = "Verified line-anchored text patching with backups and dry-run preview")]
#[command(long_about = "linepatch applies precisely located, pre-validated edits to one file.

A replacement asserts the exact current content of a line range and only
applies when that assertion holds byte-for-byte, so a caller working from
stale line numbers gets a content-mismatch error instead of a corrupted
file. Insertions add lines after a chosen anchor without removing anything.

All paths are confined to a workspace root; anything resolving outside it
is rejected before the file is touched. A sibling backup is written before
every destructive write unless --no-backup is given.

EXAMPLES:
  linepatch replace notes.txt --start 2 --end 2 --old 'line 2' --new 'fixed'
  linepatch insert notes.txt --after 0 --text 'header line'
  linepatch apply request.json --dry-run
  cat request.json | linepatch apply -
  linepatch --root /srv/project --json apply request.json")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
#[command(propagate_version = true)]
struct Cli {
    /// Workspace root; target paths outside it are rejected
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Print the machine-readable JSON outcome instead of the summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace a verified line range with new content
    #[command(long_about = "Replace an inclusive 1-indexed line range.

The --old text must equal the current content of the range exactly
(lines joined with \\n); otherwise the request is rejected with both the
expected and the found text so line numbers can be corrected.

EXAMPLES:
  linepatch replace notes.txt --start 2 --end 2 --old 'line 2' --new 'fixed'
  linepatch replace src/a.rs --start 3 --end 4 --old $'fn f() {\\n}' --new 'fn f() {}'")]
    Replace {
        /// File to edit, relative to the workspace root
        #[arg(value_name = "FILE")]
        file: String,

        /// First line of the range (1-indexed)
        #[arg(long, value_name = "N")]
        start: usize,

        /// Last line of the range, inclusive (defaults to --start)
        #[arg(long, value_name = "N")]
        end: Option<usize>,

        /// Exact current content of the range
        #[arg(long, value_name = "TEXT")]
        old: String,

        /// Replacement content
        #[arg(long, value_name = "TEXT")]
        new: String,

        /// Preview without writing
        #[arg(short = 'd', long)]
        dry_run: bool,

        /// Skip the pre-write backup
        #[arg(long = "no-backup")]
        no_backup: bool,
    },

    /// Insert new lines after an anchor line
    #[command(long_about = "Insert a block of lines after the given anchor.

--after 0 inserts before the first line; --after <line count> appends at
the end. Existing lines are never removed.

EXAMPLES:
  linepatch insert notes.txt --after 2 --text 'inserted line'
  linepatch insert notes.txt --after 0 --text $'first\\nsecond'")]
    Insert {
        /// File to edit, relative to the workspace root
        #[arg(value_name = "FILE")]
        file: String,

        /// Anchor line (0 inserts before the first line)
        #[arg(long, value_name = "N")]
        after: usize,

        /// Lines to insert (\n-separated for a block)
        #[arg(long, value_name = "TEXT")]
        text: String,

        /// Preview without writing
        #[arg(short = 'd', long)]
        dry_run: bool,

        /// Skip the pre-write backup
        #[arg(long = "no-backup")]
        no_backup: bool,
    },

    /// Apply a full JSON patch request
    #[command(long_about = "Apply a multi-operation JSON request.

The request carries one command kind (replace or insert), the target
path, the operation list, and the create_backup/dry_run flags. Use '-'
to read the request from stdin. --dry-run and --no-backup override the
flags inside the request.

EXAMPLES:
  linepatch apply request.json
  cat request.json | linepatch apply -
  linepatch apply request.json --dry-run")]
    Apply {
        /// Request file, or '-' for stdin
        #[arg(value_name = "REQUEST")]
        request: String,

        /// Force a dry run regardless of the request's flag
        #[arg(short = 'd', long)]
        dry_run: bool,

        /// Skip the pre-write backup regardless of the request's flag
        #[arg(long = "no-backup")]
        no_backup: bool,
    },

    /// Write the default configuration file if absent
    #[command(long_about = "Create ~/.linepatch/config.toml with commented defaults.

EXAMPLES:
  linepatch config")]
    Config,
}

#[derive(Debug)]
pub enum Action {
    Replace {
        file: String,
        start: usize,
        end: usize,
        old: String,
        new: String,
        dry_run: bool,
        no_backup: bool,
    },
    Insert {
        file: String,
        after: usize,
        text: String,
        dry_run: bool,
        no_backup: bool,
    },
    Apply {
        request: String,
        dry_run: bool,
        no_backup: bool,
    },
    Config,
}

#[derive(Debug)]
pub struct Args {
    pub root: Option<PathBuf>,
    pub json: bool,
    pub action: Action,
}

pub fn parse_args() -> Result<Args> {
    let cli = Cli::parse();

    let action = match cli.command {
        Commands::Replace {
            file,
            start,
            end,
            old,
            new,
            dry_run,
            no_backup,
        } => {
            let end = end.unwrap_or(start);
            if start == 0 {
                anyhow::bail!("Line numbers are 1-indexed; --start must be at least 1");
            }
            Action::Replace {
                file,
                start,
                end,
                old,
                new,
                dry_run,
                no_backup,
            }
        }
        Commands::Insert {
            file,
            after,
            text,
            dry_run,
            no_backup,
        } => Action::Insert {
            file,
            after,
            text,
            dry_run,
            no_backup,
        },
        Commands::Apply {
            request,
            dry_run,
            no_backup,
        } => Action::Apply {
            request,
            dry_run,
            no_backup,
        },
        Commands::Config => Action::Config,
    };

    Ok(Args {
        root: cli.root,
        json: cli.json,
        action,
    })
}

/// Read a request body from a file path or stdin when the path is '-'.
pub fn read_request_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut body = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut body)
            .context("Failed to read request from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read request file: {}", source))
    }
}
