mod backup;
mod cli;
mod config;
mod document;
mod engine;
mod logger;
mod path_guard;
mod planner;
mod report;
mod request;
mod validate;

use anyhow::Result;
use cli::{Action, Args, parse_args};
use config::Config;
use engine::PatchEngine;
use report::ResultReporter;
use request::{InsertionOp, PatchRequest, ReplacementOp};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = Config::load().unwrap_or_default();
    logger::init_debug_logging(config.debug_logging())?;

    if let Action::Config = args.action {
        let path = Config::write_default()?;
        println!("Configuration file: {}", path.display());
        return Ok(());
    }

    let root = workspace_root(&args, &config)?;
    let engine = PatchEngine::new(&root)?;
    let request = build_request(&args, &config)?;

    let report = engine.apply(&request)?;

    if args.json {
        println!("{}", report.outcome.to_json()?);
    } else {
        print!("{}", ResultReporter::format_report(&report));
    }

    Ok(())
}

/// --root wins, then the configured default, then the current directory.
fn workspace_root(args: &Args, config: &Config) -> Result<PathBuf> {
    if let Some(root) = &args.root {
        return Ok(root.clone());
    }
    if let Some(root) = &config.workspace.root {
        return Ok(PathBuf::from(root));
    }
    Ok(std::env::current_dir()?)
}

fn build_request(args: &Args, config: &Config) -> Result<PatchRequest> {
    let backup_default = config.backup_enabled();

    match &args.action {
        Action::Replace {
            file,
            start,
            end,
            old,
            new,
            dry_run,
            no_backup,
        } => {
            let mut request = PatchRequest::replace_single(
                file.clone(),
                ReplacementOp {
                    old_text: old.clone(),
                    new_text: new.clone(),
                    start_line: *start,
                    end_line: *end,
                },
            );
            request.create_backup = backup_default && !no_backup;
            request.dry_run = *dry_run;
            Ok(request)
        }
        Action::Insert {
            file,
            after,
            text,
            dry_run,
            no_backup,
        } => {
            let mut request = PatchRequest::insert_single(
                file.clone(),
                InsertionOp {
                    after_line: *after,
                    text: text.clone(),
                },
            );
            request.create_backup = backup_default && !no_backup;
            request.dry_run = *dry_run;
            Ok(request)
        }
        Action::Apply {
            request: source,
            dry_run,
            no_backup,
        } => {
            let body = cli::read_request_source(source)?;
            let mut request = PatchRequest::from_json(&body)?;
            if *dry_run {
                request.dry_run = true;
            }
            if *no_backup {
                request.create_backup = false;
            }
            Ok(request)
        }
        Action::Config => unreachable!("handled before request construction"),
    }
}
