// SPDX-License-Identifier: MIT

//! The managed-file-tree reconciler: a bag of files identified by content
//! hash and display name, materialized into the worktree.

use std::fs;
use std::path::{Path, PathBuf};

use jeeves_core::{reap_temps, write_atomic, Clock};
use sha2::{Digest, Sha256};

use crate::exclude::ensure_exclude_patterns;
use crate::preconditions::{vcs_marker_present, worktree_dir_ready};
use crate::status::{ReconcileOutcome, SyncStatus};

/// One desired managed file: read from `source_path`, materialized at
/// `relative_path` inside the worktree.
#[derive(Debug, Clone)]
pub struct ManagedFileSource {
    pub display_name: String,
    pub relative_path: PathBuf,
    pub source_path: PathBuf,
    pub mode: u32,
}

fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Materialize `desired` into the worktree and remove any previously
/// managed file not present in `desired` (named by `known_relative_paths`,
/// the full set this reconciler is responsible for — including ones no
/// longer desired).
pub fn reconcile_managed_files(
    worktree_dir: &Path,
    desired: &[ManagedFileSource],
    known_relative_paths: &[PathBuf],
    exclude_patterns: &[String],
    clock: &impl Clock,
) -> ReconcileOutcome {
    let outcome = (|| {
        if !worktree_dir_ready(worktree_dir) || !vcs_marker_present(worktree_dir) {
            return ReconcileOutcome {
                sync_status: SyncStatus::DeferredWorktreeAbsent,
                message: None,
                last_error: None,
            };
        }

        for file in desired {
            let _ = reap_temps(&worktree_dir.join(&file.relative_path));
        }

        if let Err(e) = ensure_exclude_patterns(worktree_dir, exclude_patterns) {
            for file in desired {
                let _ = fs::remove_file(worktree_dir.join(&file.relative_path));
            }
            return ReconcileOutcome::failure(
                SyncStatus::FailedExclude,
                "failed to update VCS exclude list",
                e.to_string(),
            );
        }

        for file in desired {
            let source_bytes = match fs::read(&file.source_path) {
                Ok(bytes) => bytes,
                Err(_) => {
                    return ReconcileOutcome::failure(
                        SyncStatus::FailedSourceMissing,
                        format!("source for {} is missing", file.display_name),
                        format!("could not read {}", file.source_path.display()),
                    );
                }
            };

            let target_path = worktree_dir.join(&file.relative_path);
            let desired_hash = content_hash(&source_bytes);
            if let Ok(existing) = fs::read(&target_path) {
                if content_hash(&existing) == desired_hash {
                    continue;
                }
            }

            if let Err(e) = write_atomic(&target_path, &source_bytes, file.mode, clock) {
                return ReconcileOutcome::failure(
                    SyncStatus::FailedLinkCreate,
                    format!("failed to materialize {}", file.display_name),
                    e.to_string(),
                );
            }
        }

        let desired_paths: std::collections::HashSet<&PathBuf> =
            desired.iter().map(|f| &f.relative_path).collect();
        for relative_path in known_relative_paths {
            if desired_paths.contains(relative_path) {
                continue;
            }
            let target_path = worktree_dir.join(relative_path);
            match fs::remove_file(&target_path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return ReconcileOutcome::failure(
                        SyncStatus::FailedEnvDelete,
                        format!("failed to remove stale managed file {}", relative_path.display()),
                        e.to_string(),
                    );
                }
            }
        }

        ReconcileOutcome::success()
    })();

    outcome.log(worktree_dir);
    outcome
}

#[cfg(test)]
#[path = "managed_tests.rs"]
mod tests;
