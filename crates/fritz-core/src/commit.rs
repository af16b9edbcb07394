//! The commit lifecycle: build or read, compile rules, validate, save.
//!
//! Two protocols drive a [`Commit`]:
//!
//! - [`Commit::write`] (prepare-commit-msg): build from fields, compile,
//!   validate, save to the message file.
//! - [`Commit::parse`] (commit-msg): read the message file, split, compile,
//!   validate. The file is never modified.
//!
//! Both stop at the first failing stage.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::CommitConfig;
use crate::domain::error::{FritzError, Result};
use crate::domain::message::{build_message, split_message, CommitFields, Sections};
use crate::domain::rules::{CompiledRuleSet, NoteRequirements};
use crate::domain::validate::{annotate_header, validate_sections};
use crate::files::{write_file, FILE_MODE};
use crate::obs::{emit_commit_prepared, emit_commit_validated, CommitSpan};

/// One commit message, tied to the file it is read from or written to.
#[derive(Debug, Clone)]
pub struct Commit {
    file: PathBuf,
    fields: Option<CommitFields>,
    requirements: NoteRequirements,
    sections: Sections,
    message: Option<String>,
}

impl Commit {
    /// A commit to be built from `fields` and written to `file`.
    pub fn new(file: impl Into<PathBuf>, fields: CommitFields) -> Self {
        Self {
            file: file.into(),
            requirements: fields.requirements(),
            fields: Some(fields),
            sections: Sections::default(),
            message: None,
        }
    }

    /// A commit to be read from `file` and checked against `requirements`.
    pub fn from_file(file: impl Into<PathBuf>, requirements: NoteRequirements) -> Self {
        Self {
            file: file.into(),
            fields: None,
            requirements,
            sections: Sections::default(),
            message: None,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn requirements(&self) -> &NoteRequirements {
        &self.requirements
    }

    pub fn is_breaking(&self) -> bool {
        self.requirements.breaking
    }

    pub fn has_ticket(&self) -> bool {
        self.requirements.has_ticket()
    }

    pub fn header(&self) -> &str {
        &self.sections.header
    }

    pub fn body(&self) -> &str {
        &self.sections.body
    }

    pub fn footer(&self) -> &str {
        &self.sections.footer
    }

    /// The assembled message (write protocol only).
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Build, validate and save the message.
    ///
    /// When validation fails the message is still saved, with the violations
    /// as comments above the header, and the validation error is returned
    /// even if that save fails.
    pub fn write(&mut self, config: &CommitConfig) -> Result<()> {
        let _span = CommitSpan::enter(&self.file);
        self.build();
        let rules = self.compile_rules(config)?;

        let outcome = self.validate(&rules);
        emit_commit_prepared(&self.file, outcome.is_ok());
        match outcome {
            Ok(()) => self.save(),
            Err(err @ FritzError::Validation(_)) => {
                // A failed save is logged by save(); the verdict still wins.
                self.save().ok();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Read and validate the message file.
    pub fn parse(&mut self, config: &CommitConfig) -> Result<()> {
        let _span = CommitSpan::enter(&self.file);
        self.read()?;
        let rules = self.compile_rules(config)?;
        self.validate(&rules)
    }

    /// Assemble the sections from the structured fields. No-op for commits
    /// created with [`Commit::from_file`].
    pub fn build(&mut self) {
        if let Some(fields) = &self.fields {
            self.sections = build_message(fields);
            self.message = Some(self.sections.assemble());
            debug!(header = %self.sections.header, "built commit message");
        }
    }

    /// Read the message file and split it into sections.
    pub fn read(&mut self) -> Result<()> {
        let raw = std::fs::read_to_string(&self.file)?;
        self.sections = split_message(&raw, &self.requirements)?;
        debug!(
            header = %self.sections.header,
            has_body = !self.sections.body.is_empty(),
            has_footer = !self.sections.footer.is_empty(),
            "read commit message"
        );
        Ok(())
    }

    /// Compile the rule set for this commit's requirements.
    pub fn compile_rules(&self, config: &CommitConfig) -> Result<CompiledRuleSet> {
        CompiledRuleSet::compile(config, &self.requirements)
    }

    /// Validate the current sections.
    ///
    /// On failure the header gains diagnostic comments; on the write protocol
    /// the assembled message is refreshed to include them.
    ///
    /// # Errors
    ///
    /// - `FritzError::RulesMismatch` when `rules` were compiled for other
    ///   requirements than this commit's.
    /// - `FritzError::Validation` with every violation found.
    pub fn validate(&mut self, rules: &CompiledRuleSet) -> Result<()> {
        if rules.requirements() != &self.requirements {
            return Err(FritzError::RulesMismatch);
        }

        let verdict = validate_sections(&self.sections, rules);
        emit_commit_validated(&self.file, verdict.violations.len(), verdict.passed());
        if verdict.passed() {
            return Ok(());
        }

        self.sections.header = annotate_header(&self.sections.header, &verdict);
        if self.message.is_some() {
            self.message = Some(self.sections.assemble());
        }
        Err(FritzError::Validation(verdict))
    }

    fn save(&self) -> Result<()> {
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| self.sections.assemble());
        write_file(&self.file, message.as_bytes(), FILE_MODE).map_err(|err| {
            warn!(path = %self.file.display(), error = %err, "failed to save commit message");
            FritzError::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate::Violation;

    fn fields(kind: &str, subject: &str, ticket: &str, breaking: bool) -> CommitFields {
        CommitFields::new(kind, "", subject, ticket, breaking)
    }

    #[test]
    fn test_requirements_derive_from_fields() {
        let commit = Commit::new("MSG", fields("feat!", "x", "T-1", false));
        assert!(commit.is_breaking());
        assert!(commit.has_ticket());
        assert!(commit.message().is_none());
    }

    #[test]
    fn test_build_sets_message() {
        let mut commit = Commit::new("MSG", fields("fix", "does a thing", "", false));
        commit.build();
        assert_eq!(commit.header(), "fix: does a thing");
        assert_eq!(commit.message(), Some("fix: does a thing"));
    }

    #[test]
    fn test_validate_rejects_foreign_rule_set() {
        let config = CommitConfig::default();
        let mut commit = Commit::new("MSG", fields("fix", "x", "", false));
        commit.build();
        let other =
            CompiledRuleSet::compile(&config, &NoteRequirements::new(true, "")).unwrap();
        assert!(matches!(
            commit.validate(&other),
            Err(FritzError::RulesMismatch)
        ));
    }

    #[test]
    fn test_failed_validation_annotates_message() {
        let config = CommitConfig::default();
        let mut commit = Commit::new("MSG", fields("chore", "x", "", false));
        commit.build();
        let rules = commit.compile_rules(&config).unwrap();
        let err = commit.validate(&rules).unwrap_err();
        assert_eq!(
            err.verdict().unwrap().violations,
            vec![Violation::HeaderInvalid]
        );
        assert_eq!(commit.header(), "# ERROR: header is invalid\nchore: x");
        assert_eq!(commit.message(), Some("# ERROR: header is invalid\nchore: x"));
    }

    #[test]
    fn test_validate_twice_is_stable() {
        let config = CommitConfig::default();
        let mut commit = Commit::new("MSG", fields("fix", "stable", "", false));
        commit.build();
        let rules = commit.compile_rules(&config).unwrap();
        assert!(commit.validate(&rules).is_ok());
        assert!(commit.validate(&rules).is_ok());
        assert_eq!(commit.header(), "fix: stable");
    }
}
