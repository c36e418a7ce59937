//! linepatch: verified line-anchored text patching
//!
//! This library exposes the patch engine for use in integration and
//! property-based tests. The main binary is at src/main.rs.

pub mod backup;
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod logger;
pub mod path_guard;
pub mod planner;
pub mod report;
pub mod request;
pub mod validate;

// Re-export commonly used types for convenience
pub use config::Config;
pub use document::Document;
pub use engine::{PatchEngine, PatchReport};
pub use path_guard::PathGuard;
pub use report::ResultReporter;
pub use request::{InsertionOp, PatchCommand, PatchOutcome, PatchRequest, ReplacementOp};
