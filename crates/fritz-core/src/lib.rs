//! fritz core library
//!
//! Conventional Commits enforcement for git hooks: builds commit messages
//! from structured fields and validates hand-written ones against rules
//! compiled from `fritz.toml`.

pub mod commit;
pub mod config;
pub mod domain;
mod files;
pub mod git;
pub mod hooks;
pub mod obs;
pub mod telemetry;

pub use commit::Commit;
pub use config::{CommitConfig, CONFIG_FILE_NAME};
pub use domain::{
    build_message, split_message, validate_sections, CommitFields, CompiledRuleSet, FritzError,
    NoteRequirements, Result, Sections, Verdict, Violation, BREAKING_CHANGE, DELIMITER,
    MAX_HEADER_LENGTH, REQUIRED_KINDS,
};
pub use files::{FILE_MODE, SCRIPT_MODE};
pub use git::{ensure_repo_root, hooks_dir, is_git_repo};
pub use hooks::{cleanup, config_path, hooks_for, setup, Feature, Hook};
pub use obs::CommitSpan;
pub use telemetry::init_tracing;

/// fritz version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
