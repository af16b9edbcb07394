//! User configuration, stored as `fritz.toml` next to the `.git` directory.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::Result;
use crate::domain::rules::REQUIRED_KINDS;
use crate::files::{write_file, FILE_MODE};

/// Name of the configuration file in the repository root.
pub const CONFIG_FILE_NAME: &str = "fritz.toml";

/// Extra kind written by `setup` into a fresh configuration.
pub const DEFAULT_EXTRA_KIND: &str = "improvement";

/// Values that personalize commit validation.
///
/// Keys are camelCase on disk (`otherTypes`, `ticketFormat`). Missing keys
/// default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitConfig {
    /// Hooks installed by `setup`, removed again by `cleanup`.
    pub hooks: Vec<String>,
    /// Kinds accepted in addition to `fix` and `feat`.
    pub other_types: Vec<String>,
    /// Accepted scopes. Empty accepts any word.
    pub scopes: Vec<String>,
    /// Regex fragment a ticket reference in the footer must match.
    pub ticket_format: String,
}

impl CommitConfig {
    /// The configuration `setup` writes for the given hooks.
    pub fn default_for_setup(hooks: Vec<String>) -> Self {
        Self {
            hooks,
            other_types: vec![DEFAULT_EXTRA_KIND.to_string()],
            ..Default::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        debug!(
            path = %path.display(),
            other_types = config.other_types.len(),
            scopes = config.scopes.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self)?;
        write_file(path, raw.as_bytes(), FILE_MODE)?;
        Ok(())
    }

    /// Every accepted kind: the required ones first, then the configured ones.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        REQUIRED_KINDS
            .iter()
            .copied()
            .chain(self.other_types.iter().map(String::as_str))
    }
}
