//! Locating the git hooks directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::warn;

use crate::domain::error::{FritzError, Result};

/// Name of the repository-level git folder.
pub const GIT_DIR: &str = ".git";

/// Name of the hooks folder inside [`GIT_DIR`].
pub const HOOKS_DIR: &str = "hooks";

/// `<root>/.git/hooks`.
pub fn hooks_dir(root: &Path) -> PathBuf {
    root.join(GIT_DIR).join(HOOKS_DIR)
}

/// Check that `dir` is a repository root, i.e. holds `.git/hooks`.
///
/// Returns the hooks directory.
pub fn ensure_repo_root(dir: &Path) -> Result<PathBuf> {
    let hooks = hooks_dir(dir);
    if hooks.is_dir() {
        return Ok(hooks);
    }

    if is_git_repo(dir) {
        warn!(dir = %dir.display(), "inside a git work tree but not at its root");
    }
    Err(FritzError::NotRepoRoot(dir.to_path_buf()))
}

/// Check whether a directory is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command as StdCommand;

    fn run_git(repo_dir: &Path, args: &[&str]) {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(repo_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn make_git_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init"]);
        std::fs::create_dir_all(hooks_dir(dir.path())).unwrap();
        dir
    }

    #[test]
    fn ensure_repo_root_accepts_root() {
        let repo = make_git_repo();
        let hooks = ensure_repo_root(repo.path()).unwrap();
        assert_eq!(hooks, repo.path().join(".git").join("hooks"));
    }

    #[test]
    fn ensure_repo_root_rejects_subdirectory() {
        let repo = make_git_repo();
        let sub = repo.path().join("src");
        std::fs::create_dir_all(&sub).unwrap();
        let err = ensure_repo_root(&sub).unwrap_err();
        assert!(matches!(err, FritzError::NotRepoRoot(dir) if dir == sub));
    }

    #[test]
    fn ensure_repo_root_rejects_plain_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_repo_root(dir.path()).is_err());
    }

    #[test]
    fn is_git_repo_true_for_repo() {
        let repo = make_git_repo();
        assert!(is_git_repo(repo.path()));
    }

    #[test]
    fn is_git_repo_false_for_non_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_git_repo(dir.path()));
    }
}
