// SPDX-License-Identifier: MIT

use super::*;
use jeeves_core::SystemClock;
use tempfile::tempdir;

fn init_worktree(dir: &Path) {
    fs::create_dir_all(dir.join(".git").join("info")).unwrap();
}

fn source(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn materializes_a_managed_file_from_its_source() {
    let worktree = tempdir().unwrap();
    let sources = tempdir().unwrap();
    init_worktree(worktree.path());
    let source_path = source(sources.path(), "runbook.md", b"hello");

    let desired = vec![ManagedFileSource {
        display_name: "runbook".to_string(),
        relative_path: PathBuf::from("runbook.md"),
        source_path,
        mode: 0o644,
    }];
    let outcome =
        reconcile_managed_files(worktree.path(), &desired, &[], &["runbook.md".to_string()], &SystemClock);
    assert!(outcome.sync_status.is_success());
    assert_eq!(fs::read(worktree.path().join("runbook.md")).unwrap(), b"hello");
}

#[test]
fn skips_rewrite_when_content_hash_is_unchanged() {
    let worktree = tempdir().unwrap();
    let sources = tempdir().unwrap();
    init_worktree(worktree.path());
    let source_path = source(sources.path(), "runbook.md", b"hello");
    let desired = vec![ManagedFileSource {
        display_name: "runbook".to_string(),
        relative_path: PathBuf::from("runbook.md"),
        source_path: source_path.clone(),
        mode: 0o644,
    }];

    reconcile_managed_files(worktree.path(), &desired, &[], &["runbook.md".to_string()], &SystemClock);
    let before = fs::metadata(worktree.path().join("runbook.md")).unwrap().modified().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(10));
    reconcile_managed_files(worktree.path(), &desired, &[], &["runbook.md".to_string()], &SystemClock);
    let after = fs::metadata(worktree.path().join("runbook.md")).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn missing_source_yields_failed_source_missing() {
    let worktree = tempdir().unwrap();
    init_worktree(worktree.path());
    let desired = vec![ManagedFileSource {
        display_name: "runbook".to_string(),
        relative_path: PathBuf::from("runbook.md"),
        source_path: PathBuf::from("/nonexistent/does-not-exist"),
        mode: 0o644,
    }];
    let outcome =
        reconcile_managed_files(worktree.path(), &desired, &[], &["runbook.md".to_string()], &SystemClock);
    assert_eq!(outcome.sync_status, SyncStatus::FailedSourceMissing);
}

#[test]
fn removes_a_previously_managed_file_no_longer_desired() {
    let worktree = tempdir().unwrap();
    let sources = tempdir().unwrap();
    init_worktree(worktree.path());
    let source_path = source(sources.path(), "runbook.md", b"hello");
    let desired = vec![ManagedFileSource {
        display_name: "runbook".to_string(),
        relative_path: PathBuf::from("runbook.md"),
        source_path,
        mode: 0o644,
    }];
    reconcile_managed_files(worktree.path(), &desired, &[], &["runbook.md".to_string()], &SystemClock);
    assert!(worktree.path().join("runbook.md").exists());

    let outcome = reconcile_managed_files(
        worktree.path(),
        &[],
        &[PathBuf::from("runbook.md")],
        &["runbook.md".to_string()],
        &SystemClock,
    );
    assert!(outcome.sync_status.is_success());
    assert!(!worktree.path().join("runbook.md").exists());
}

#[test]
fn missing_worktree_is_deferred() {
    let worktree = tempdir().unwrap();
    let outcome = reconcile_managed_files(&worktree.path().join("missing"), &[], &[], &[], &SystemClock);
    assert_eq!(outcome.sync_status, SyncStatus::DeferredWorktreeAbsent);
}
