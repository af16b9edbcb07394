//! Structured observability hooks for commit and hook lifecycle events.
//!
//! Events are emitted at `info!` level; filter them with `RUST_LOG`.

use std::path::Path;

use tracing::info;

/// RAII guard that enters a span tagged with the commit message file.
///
/// ```ignore
/// let _span = CommitSpan::enter(Path::new(".git/COMMIT_EDITMSG"));
/// // tracing calls below carry file = ".git/COMMIT_EDITMSG"
/// ```
pub struct CommitSpan {
    _span: tracing::span::EnteredSpan,
}

impl CommitSpan {
    pub fn enter(file: &Path) -> Self {
        let span = tracing::info_span!("fritz.commit", file = %file.display());
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a message was built from fields, valid or not.
pub fn emit_commit_prepared(file: &Path, valid: bool) {
    info!(event = "commit.prepared", file = %file.display(), valid = valid);
}

/// Emit event: a message was checked against its rule set.
pub fn emit_commit_validated(file: &Path, violations: usize, passed: bool) {
    info!(
        event = "commit.validated",
        file = %file.display(),
        violations = violations,
        passed = passed,
    );
}

/// Emit event: a hook script was written.
pub fn emit_hook_installed(hook: &str, path: &Path) {
    info!(event = "hook.installed", hook = %hook, path = %path.display());
}

/// Emit event: a hook script was deleted.
pub fn emit_hook_removed(hook: &str, path: &Path) {
    info!(event = "hook.removed", hook = %hook, path = %path.display());
}
