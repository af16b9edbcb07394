//! `setup` and `cleanup` against a scratch repository layout.

use std::path::Path;

use fritz_core::{
    cleanup, config_path, ensure_repo_root, hooks_dir, setup, CommitConfig, Feature, FritzError,
};

fn make_repo_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(hooks_dir(dir.path())).unwrap();
    dir
}

fn hook_path(root: &Path, name: &str) -> std::path::PathBuf {
    hooks_dir(root).join(name)
}

#[test]
fn setup_installs_hooks_and_config() {
    let repo = make_repo_root();
    ensure_repo_root(repo.path()).unwrap();

    let config = setup(
        repo.path(),
        &[Feature::CommitPrep, Feature::CommitValidate],
    )
    .unwrap();
    assert_eq!(config.hooks, vec!["prepare-commit-msg", "commit-msg"]);
    assert_eq!(config.other_types, vec!["improvement"]);

    let prep = std::fs::read_to_string(hook_path(repo.path(), "prepare-commit-msg")).unwrap();
    assert!(prep.contains("fritz commit-prep"));
    let validate = std::fs::read_to_string(hook_path(repo.path(), "commit-msg")).unwrap();
    assert!(validate.contains("fritz commit-validate"));

    let saved = CommitConfig::load(&config_path(repo.path())).unwrap();
    assert_eq!(saved, config);
}

#[cfg(unix)]
#[test]
fn setup_makes_hooks_executable() {
    use std::os::unix::fs::PermissionsExt;

    let repo = make_repo_root();
    let existing = hook_path(repo.path(), "commit-msg");
    std::fs::write(&existing, "old hook").unwrap();
    std::fs::set_permissions(&existing, std::fs::Permissions::from_mode(0o600)).unwrap();

    setup(repo.path(), &[Feature::CommitValidate]).unwrap();
    let mode = std::fs::metadata(&existing).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[test]
fn setup_without_features_writes_nothing() {
    let repo = make_repo_root();
    assert!(matches!(setup(repo.path(), &[]), Err(FritzError::NoFeatures)));
    assert!(!config_path(repo.path()).exists());
    assert_eq!(std::fs::read_dir(hooks_dir(repo.path())).unwrap().count(), 0);
}

#[test]
fn cleanup_removes_what_setup_installed() {
    let repo = make_repo_root();
    setup(repo.path(), &[Feature::CommitValidate]).unwrap();
    assert!(hook_path(repo.path(), "commit-msg").exists());

    cleanup(repo.path()).unwrap();
    assert!(!hook_path(repo.path(), "commit-msg").exists());
    assert!(!config_path(repo.path()).exists());
}

#[test]
fn cleanup_without_config_fails() {
    let repo = make_repo_root();
    assert!(matches!(cleanup(repo.path()), Err(FritzError::Io(_))));
}

#[test]
fn cleanup_stops_at_missing_hook() {
    let repo = make_repo_root();
    setup(repo.path(), &[Feature::CommitPrep, Feature::CommitValidate]).unwrap();
    std::fs::remove_file(hook_path(repo.path(), "prepare-commit-msg")).unwrap();

    assert!(matches!(cleanup(repo.path()), Err(FritzError::Io(_))));
    // The configuration survives so cleanup can be retried.
    assert!(config_path(repo.path()).exists());
    assert!(hook_path(repo.path(), "commit-msg").exists());
}

#[test]
fn cleanup_rejects_unknown_hook_names() {
    let repo = make_repo_root();
    let config = CommitConfig {
        hooks: vec!["../escape".to_string()],
        ..Default::default()
    };
    config.save(&config_path(repo.path())).unwrap();
    assert!(matches!(
        cleanup(repo.path()),
        Err(FritzError::UnknownHook(name)) if name == "../escape"
    ));
}
