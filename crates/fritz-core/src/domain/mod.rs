//! The commit message engine.
//!
//! - `rules`: compiles a [`CommitConfig`](crate::config::CommitConfig) into patterns
//! - `message`: splits raw text into sections and builds sections from fields
//! - `validate`: checks sections against compiled rules, collecting violations
//! - `error`: the error taxonomy shared by the whole crate

pub mod error;
pub mod message;
pub mod rules;
pub mod validate;

pub use error::{FritzError, Result};
pub use message::{build_message, split_message, CommitFields, Sections, DELIMITER};
pub use rules::{CompiledRuleSet, NoteRequirements, BREAKING_CHANGE, REQUIRED_KINDS};
pub use validate::{validate_sections, Verdict, Violation, MAX_HEADER_LENGTH};
