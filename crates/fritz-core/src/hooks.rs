//! Installing and removing the git hooks that run fritz.
//!
//! Each user-facing feature maps to one git hook:
//!
//! | feature           | hook                 |
//! |-------------------|----------------------|
//! | `commit-prep`     | `prepare-commit-msg` |
//! | `commit-validate` | `commit-msg`         |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::config::{CommitConfig, CONFIG_FILE_NAME};
use crate::domain::error::{FritzError, Result};
use crate::files::{set_mode, write_file, SCRIPT_MODE};
use crate::git::hooks_dir;
use crate::obs::{emit_hook_installed, emit_hook_removed};

/// A capability that can be switched on by `setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    CommitPrep,
    CommitValidate,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Self::CommitPrep => "commit-prep",
            Self::CommitValidate => "commit-validate",
        }
    }

    /// The git hook during which this feature runs.
    pub fn hook(self) -> Hook {
        match self {
            Self::CommitPrep => Hook::PrepareCommitMsg,
            Self::CommitValidate => Hook::CommitMsg,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = FritzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "commit-prep" => Ok(Self::CommitPrep),
            "commit-validate" => Ok(Self::CommitValidate),
            other => Err(FritzError::UnknownFeature(other.to_string())),
        }
    }
}

/// A git hook fritz installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    PrepareCommitMsg,
    CommitMsg,
}

impl Hook {
    /// The official git hook name, also the script's file name.
    pub fn name(self) -> &'static str {
        match self {
            Self::PrepareCommitMsg => "prepare-commit-msg",
            Self::CommitMsg => "commit-msg",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "prepare-commit-msg" => Ok(Self::PrepareCommitMsg),
            "commit-msg" => Ok(Self::CommitMsg),
            other => Err(FritzError::UnknownHook(other.to_string())),
        }
    }

    /// The shell script written to `.git/hooks/<name>`.
    pub fn script(self) -> String {
        match self {
            // $1 is the message file, $2 the message source. Messages that
            // come from -m, a template, a merge or an amend are left alone, as
            // are commits made without FRITZ_TYPE.
            Self::PrepareCommitMsg => format!(
                "#!/bin/sh\n\
                 # Installed by fritz ({feature}). Remove with `fritz cleanup`.\n\
                 # Fields come from FRITZ_TYPE, FRITZ_SCOPE, FRITZ_SUBJECT,\n\
                 # FRITZ_TICKET and FRITZ_BREAKING.\n\
                 case \"$2\" in\n\
                 \x20 message|template|merge|squash|commit) exit 0 ;;\n\
                 esac\n\
                 [ -n \"$FRITZ_TYPE\" ] || exit 0\n\
                 exec fritz commit-prep --location \"$1\"\n",
                feature = Feature::CommitPrep,
            ),
            Self::CommitMsg => format!(
                "#!/bin/sh\n\
                 # Installed by fritz ({feature}). Remove with `fritz cleanup`.\n\
                 exec fritz commit-validate --location \"$1\"\n",
                feature = Feature::CommitValidate,
            ),
        }
    }
}

/// The hooks needed for `features`, in feature order, without duplicates.
pub fn hooks_for(features: &[Feature]) -> Vec<Hook> {
    let mut hooks = Vec::new();
    for feature in features {
        let hook = feature.hook();
        if !hooks.contains(&hook) {
            hooks.push(hook);
        }
    }
    hooks
}

/// Set `root` up for fritz: write one script per hook, then the default
/// configuration listing those hooks.
///
/// `root` must already hold `.git/hooks`; see [`crate::git::ensure_repo_root`].
///
/// # Errors
///
/// - `FritzError::NoFeatures` when `features` is empty.
/// - `FritzError::Io` when a script or the configuration cannot be written.
pub fn setup(root: &Path, features: &[Feature]) -> Result<CommitConfig> {
    if features.is_empty() {
        return Err(FritzError::NoFeatures);
    }

    let hooks = hooks_for(features);
    let config = CommitConfig::default_for_setup(
        hooks.iter().map(|hook| hook.name().to_string()).collect(),
    );

    let dir = hooks_dir(root);
    for hook in &hooks {
        let path = dir.join(hook.name());
        write_file(&path, hook.script().as_bytes(), SCRIPT_MODE)?;
        // An existing hook keeps its old permissions through a truncating write.
        set_mode(&path, SCRIPT_MODE)?;
        emit_hook_installed(hook.name(), &path);
    }

    let config_path = config_path(root);
    config.save(&config_path)?;
    debug!(path = %config_path.display(), "wrote configuration");

    Ok(config)
}

/// Remove fritz from `root`: delete every hook listed in the configuration,
/// then the configuration itself. Stops at the first failure.
pub fn cleanup(root: &Path) -> Result<()> {
    let config_path = config_path(root);
    let config = CommitConfig::load(&config_path)?;

    let dir = hooks_dir(root);
    for name in &config.hooks {
        let hook = Hook::from_name(name)?;
        let path = dir.join(hook.name());
        std::fs::remove_file(&path)?;
        emit_hook_removed(hook.name(), &path);
    }

    std::fs::remove_file(&config_path)?;
    debug!(path = %config_path.display(), "removed configuration");
    Ok(())
}

/// `<root>/fritz.toml`.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}
