//! Error taxonomy for the commit message engine and its plumbing.

use std::path::PathBuf;

use super::validate::Verdict;

/// Errors produced by fritz.
///
/// Every variant except [`FritzError::Validation`] is terminal for the stage
/// that raised it. `Validation` carries every rule violation found in one pass.
#[derive(Debug, thiserror::Error)]
pub enum FritzError {
    #[error("invalid {rule} pattern: {source}")]
    InvalidPattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("rule set was compiled for different note requirements than this commit")]
    RulesMismatch,

    #[error("commit message is empty")]
    EmptyMessage,

    #[error("body or footer is required but missing")]
    SectionsMissing,

    #[error("{0}")]
    Validation(Verdict),

    #[error("{} has no .git/hooks directory; call fritz from the same level as the .git directory", .0.display())]
    NotRepoRoot(PathBuf),

    #[error("need to select at least 1 feature for setup")]
    NoFeatures,

    #[error("unknown feature: {0} (expected commit-prep or commit-validate)")]
    UnknownFeature(String),

    #[error("unknown hook in configuration: {0}")]
    UnknownHook(String),

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FritzError {
    /// The verdict behind a validation failure, if this is one.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Self::Validation(verdict) => Some(verdict),
            _ => None,
        }
    }
}

/// Result type for fritz operations.
pub type Result<T> = std::result::Result<T, FritzError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate::Violation;

    #[test]
    fn test_structural_error_display() {
        assert_eq!(
            FritzError::EmptyMessage.to_string(),
            "commit message is empty"
        );
        assert_eq!(
            FritzError::SectionsMissing.to_string(),
            "body or footer is required but missing"
        );
    }

    #[test]
    fn test_invalid_pattern_names_rule() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = FritzError::InvalidPattern {
            rule: "header",
            source,
        };
        assert!(err.to_string().starts_with("invalid header pattern"));
    }

    #[test]
    fn test_validation_error_joins_reasons() {
        let err = FritzError::Validation(Verdict {
            violations: vec![Violation::HeaderInvalid, Violation::TicketMissing],
        });
        assert_eq!(err.to_string(), "header is invalid\nticket missing");
        assert_eq!(err.verdict().map(|v| v.violations.len()), Some(2));
    }

    #[test]
    fn test_not_repo_root_mentions_dir() {
        let err = FritzError::NotRepoRoot(PathBuf::from("/tmp/nowhere"));
        assert!(err.to_string().contains("/tmp/nowhere"));
        assert!(err.verdict().is_none());
    }
}
