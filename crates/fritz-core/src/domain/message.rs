//! Commit message sections: splitting raw text and building from fields.

use super::error::{FritzError, Result};
use super::rules::{NoteRequirements, BREAKING_CHANGE, BREAKING_SYMBOL};

/// Separates the header, body and footer of a message.
pub const DELIMITER: &str = "\n\n";

/// Header, body and footer of one commit message.
///
/// Sections produced by [`build_message`] keep their leading delimiter so
/// that concatenating them yields the full message. Sections produced by
/// [`split_message`] do not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub header: String,
    pub body: String,
    pub footer: String,
}

impl Sections {
    /// Concatenate the sections as built by [`build_message`].
    pub fn assemble(&self) -> String {
        format!("{}{}{}", self.header, self.body, self.footer)
    }
}

/// Split a raw message into sections.
///
/// The first section is the header and, when there is more than one, the
/// last is the footer. Interior sections form the body only when a ticket is
/// expected; otherwise they are dropped.
///
/// # Errors
///
/// - `FritzError::EmptyMessage` when `raw` is empty.
/// - `FritzError::SectionsMissing` when `raw` has a single section but a
///   breaking note or ticket reference is required.
pub fn split_message(raw: &str, requirements: &NoteRequirements) -> Result<Sections> {
    if raw.is_empty() {
        return Err(FritzError::EmptyMessage);
    }

    let sections: Vec<&str> = raw.split(DELIMITER).collect();
    let header = sections[0].to_string();

    if sections.len() == 1 {
        if requirements.needs_notes() {
            return Err(FritzError::SectionsMissing);
        }
        return Ok(Sections {
            header,
            ..Default::default()
        });
    }

    let last = sections.len() - 1;
    let body = if requirements.has_ticket() {
        sections[1..last].join(DELIMITER)
    } else {
        String::new()
    };

    Ok(Sections {
        header,
        body,
        footer: sections[last].to_string(),
    })
}

/// Structured input for a new commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitFields {
    pub kind: String,
    pub scope: String,
    pub subject: String,
    pub ticket: String,
    pub breaking: bool,
}

impl CommitFields {
    /// The kind is stored lower-cased.
    pub fn new(kind: &str, scope: &str, subject: &str, ticket: &str, breaking: bool) -> Self {
        Self {
            kind: kind.to_lowercase(),
            scope: scope.to_string(),
            subject: subject.to_string(),
            ticket: ticket.to_string(),
            breaking,
        }
    }

    /// A commit is breaking when flagged explicitly or when its kind carries `!`.
    pub fn is_breaking(&self) -> bool {
        self.breaking || self.kind.contains(BREAKING_SYMBOL)
    }

    pub fn requirements(&self) -> NoteRequirements {
        NoteRequirements::new(self.is_breaking(), &self.ticket)
    }
}

/// Build the sections of a message from its fields. Performs no validation.
pub fn build_message(fields: &CommitFields) -> Sections {
    let header = if fields.scope.is_empty() {
        format!("{}: {}", fields.kind, fields.subject)
    } else {
        format!("{}({}): {}", fields.kind, fields.scope, fields.subject)
    };

    let body = if fields.is_breaking() {
        format!("{DELIMITER}{BREAKING_CHANGE}")
    } else {
        String::new()
    };

    let footer = if fields.ticket.is_empty() {
        String::new()
    } else {
        format!("{DELIMITER}closes {}", fields.ticket)
    };

    Sections {
        header,
        body,
        footer,
    }
}
