//! Validation of commit sections against a [`CompiledRuleSet`].
//!
//! Every rule is evaluated; violations accumulate into a [`Verdict`] instead
//! of stopping at the first failure.

use std::fmt;

use serde::Serialize;

use super::message::Sections;
use super::rules::CompiledRuleSet;

/// Longest accepted header line, in Unicode code points.
pub const MAX_HEADER_LENGTH: usize = 50;

/// Prefix of the diagnostic comment placed above an invalid header.
pub const ERROR_MARKER: &str = "# ERROR: ";

/// A single rule a commit message failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    #[error("header is invalid")]
    HeaderInvalid,

    #[error("header cannot be longer than {limit} characters (got {length})")]
    HeaderTooLong { length: usize, limit: usize },

    #[error("breaking message missing")]
    BreakingNoteMissing,

    #[error("ticket missing")]
    TicketMissing,
}

/// Outcome of validating one commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Violations found, in rule order (empty when passed).
    pub violations: Vec<Violation>,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Length of the header section in code points, comment lines excluded.
///
/// Stray lines after the header line count too, so they cannot hide
/// behind a short first line.
pub fn header_length(header: &str) -> usize {
    header
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .chars()
        .count()
}

/// Check `sections` against `rules`.
pub fn validate_sections(sections: &Sections, rules: &CompiledRuleSet) -> Verdict {
    let mut violations = Vec::new();

    if !rules.header().is_match(&sections.header) {
        violations.push(Violation::HeaderInvalid);
    }

    let length = header_length(&sections.header);
    if length > MAX_HEADER_LENGTH {
        violations.push(Violation::HeaderTooLong {
            length,
            limit: MAX_HEADER_LENGTH,
        });
    }

    if let (Some(anywhere), Some(body_start)) = (rules.breaking(), rules.breaking_in_body()) {
        if !(anywhere.is_match(&sections.footer) || body_start.is_match(&sections.body)) {
            violations.push(Violation::BreakingNoteMissing);
        }
    }

    if let Some(ticket) = rules.ticket() {
        if !ticket.is_match(&sections.footer) {
            violations.push(Violation::TicketMissing);
        }
    }

    Verdict { violations }
}

/// Prefix `header` with one diagnostic comment per violation.
///
/// Diagnostics left by an earlier pass are replaced.
pub fn annotate_header(header: &str, verdict: &Verdict) -> String {
    let mut rest = header;
    while let Some(stripped) = rest.strip_prefix(ERROR_MARKER) {
        rest = stripped.split_once('\n').map_or("", |(_, tail)| tail);
    }

    let mut annotated = String::new();
    for violation in &verdict.violations {
        annotated.push_str(ERROR_MARKER);
        annotated.push_str(&violation.to_string());
        annotated.push('\n');
    }
    annotated.push_str(rest);
    annotated
}
