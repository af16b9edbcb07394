//! Rule compilation: turns a [`CommitConfig`] into the regular expressions a
//! commit message is checked against.
//!
//! Kinds, scopes and the ticket format are inserted into the patterns as
//! regex fragments, unescaped. A configured scope of `api-\d+` therefore
//! accepts `api-1`, `api-22`, and so on. A malformed fragment fails
//! compilation with [`FritzError::InvalidPattern`].

use regex::Regex;
use tracing::debug;

use super::error::{FritzError, Result};
use crate::config::CommitConfig;

/// Kinds that are always accepted, whatever the configuration says.
pub const REQUIRED_KINDS: &[&str] = &["fix", "feat"];

/// Marker appended to a kind to flag a breaking change (`feat!`).
pub const BREAKING_SYMBOL: char = '!';

/// Prefix of a breaking change note.
pub const BREAKING_CHANGE: &str = "BREAKING CHANGE: ";

/// A git comment line inside the header section.
const COMMENT_EXPR: &str = r"#.*\n?";

/// Default scope rule when no scopes are configured: any word.
const ANY_SCOPE_EXPR: &str = r"\w+";

/// Which notes a commit must carry besides its header.
///
/// Fixed when the commit is created; the rule set is compiled for exactly one
/// value of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRequirements {
    pub breaking: bool,
    pub ticket: Option<String>,
}

impl NoteRequirements {
    /// An empty `ticket` means no ticket is expected.
    pub fn new(breaking: bool, ticket: &str) -> Self {
        Self {
            breaking,
            ticket: (!ticket.is_empty()).then(|| ticket.to_string()),
        }
    }

    pub fn has_ticket(&self) -> bool {
        self.ticket.is_some()
    }

    /// Whether the message needs a section after the header.
    pub fn needs_notes(&self) -> bool {
        self.breaking || self.has_ticket()
    }
}

#[derive(Debug, Clone)]
struct BreakingRules {
    anywhere: Regex,
    body_start: Regex,
}

/// Patterns compiled for one commit.
#[derive(Debug, Clone)]
pub struct CompiledRuleSet {
    requirements: NoteRequirements,
    header: Regex,
    breaking: Option<BreakingRules>,
    ticket: Option<Regex>,
}

impl CompiledRuleSet {
    /// Compile the header rule, plus the breaking rules when `requirements`
    /// asks for a breaking note and the ticket rule when it expects a ticket.
    pub fn compile(config: &CommitConfig, requirements: &NoteRequirements) -> Result<Self> {
        let header_expr = header_pattern(config);
        debug!(pattern = %header_expr, "compiling header rule");
        let header = compile("header", &header_expr)?;

        let breaking = if requirements.breaking {
            let note = regex::escape(BREAKING_CHANGE);
            Some(BreakingRules {
                anywhere: compile("breaking", &format!(r"(?m)^{note}.+"))?,
                body_start: compile("breaking-in-body", &format!(r"\A\n*{note}.*"))?,
            })
        } else {
            None
        };

        let ticket = match &requirements.ticket {
            Some(ticket) => {
                // A literal ticket may start or end with a non-word
                // character (`#42`), where `\b` can never match.
                let expr = if config.ticket_format.is_empty() {
                    let literal = regex::escape(ticket);
                    format!(r"(?m)^.*\W{literal}(?:\W|$)")
                } else {
                    let format = &config.ticket_format;
                    format!(r"(?m)^.+\b(?:{format})\b")
                };
                debug!(pattern = %expr, "compiling ticket rule");
                Some(compile("ticket", &expr)?)
            }
            None => None,
        };

        Ok(Self {
            requirements: requirements.clone(),
            header,
            breaking,
            ticket,
        })
    }

    /// The requirements this rule set was compiled for.
    pub fn requirements(&self) -> &NoteRequirements {
        &self.requirements
    }

    pub fn header(&self) -> &Regex {
        &self.header
    }

    /// Matches a breaking note at the start of any line.
    pub fn breaking(&self) -> Option<&Regex> {
        self.breaking.as_ref().map(|b| &b.anywhere)
    }

    /// Matches a breaking note only as the first line of a body.
    pub fn breaking_in_body(&self) -> Option<&Regex> {
        self.breaking.as_ref().map(|b| &b.body_start)
    }

    pub fn ticket(&self) -> Option<&Regex> {
        self.ticket.as_ref()
    }
}

fn alternation<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .map(|v| format!("(?:{v})"))
        .collect::<Vec<_>>()
        .join("|")
}

fn header_pattern(config: &CommitConfig) -> String {
    let kinds = alternation(config.kinds());

    let scopes = if config.scopes.is_empty() {
        ANY_SCOPE_EXPR.to_string()
    } else {
        alternation(config.scopes.iter().map(String::as_str))
    };

    format!(
        r"\A(?:{COMMENT_EXPR})*(?:{kinds}){}?(?:\((?:{scopes})\))?: .+(?:\n#.*)*\n?\z",
        regex::escape(&BREAKING_SYMBOL.to_string())
    )
}

fn compile(rule: &'static str, expr: &str) -> Result<Regex> {
    Regex::new(expr).map_err(|source| FritzError::InvalidPattern { rule, source })
}
