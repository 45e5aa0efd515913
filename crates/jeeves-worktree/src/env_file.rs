// SPDX-License-Identifier: MIT

//! The single-variable env-file reconciler: `<worktreeDir>/.env.jeeves`,
//! one line `KEY="<escaped>"`.

use std::fs;
use std::path::Path;

use jeeves_core::{reap_temps, write_atomic, Clock};

use crate::exclude::ensure_exclude_patterns;
use crate::preconditions::{vcs_marker_present, worktree_dir_ready};
use crate::status::{ReconcileOutcome, SyncStatus};

const ENV_FILE_NAME: &str = ".env.jeeves";

fn env_file_path(worktree_dir: &Path) -> std::path::PathBuf {
    worktree_dir.join(ENV_FILE_NAME)
}

/// Escape backslashes then quotes, and wrap as `KEY="<escaped>"\n`.
pub fn encode_env_line(key: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{key}=\"{escaped}\"\n")
}

fn sanitize(message: String, secret_value: &str) -> String {
    if secret_value.is_empty() {
        message
    } else {
        message.replace(secret_value, "[REDACTED]")
    }
}

/// Materialize (or remove, when `value` is `None`) the single-variable env
/// file. Preconditions: worktree dir exists, VCS marker present, exclude
/// list updated (preceding the write so a crash between write and ignore
/// cannot produce a committable secret).
pub fn reconcile_env_file(
    worktree_dir: &Path,
    key: &str,
    value: Option<&str>,
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

        let path = env_file_path(worktree_dir);
        let _ = reap_temps(&path);

        let patterns = vec![ENV_FILE_NAME.to_string(), format!("{ENV_FILE_NAME}.tmp")];
        if let Err(e) = ensure_exclude_patterns(worktree_dir, &patterns) {
            let _ = fs::remove_file(&path);
            let secret = value.unwrap_or("");
            return ReconcileOutcome::failure(
                SyncStatus::FailedExclude,
                "failed to update VCS exclude list",
                sanitize(e.to_string(), secret),
            );
        }

        let Some(value) = value else {
            return match fs::remove_file(&path) {
                Ok(()) => ReconcileOutcome::success(),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => ReconcileOutcome::success(),
                Err(e) => ReconcileOutcome::failure(
                    SyncStatus::FailedEnvDelete,
                    "failed to remove env file",
                    e.to_string(),
                ),
            };
        };

        let desired_contents = encode_env_line(key, value);

        if let Ok(existing) = fs::read(&path) {
            if existing == desired_contents.as_bytes() {
                return ReconcileOutcome::success();
            }
        }

        match write_atomic(&path, desired_contents.as_bytes(), 0o600, clock) {
            Ok(()) => ReconcileOutcome::success(),
            Err(e) => ReconcileOutcome::failure(
                SyncStatus::FailedEnvWrite,
                "failed to write env file",
                sanitize(e.to_string(), value),
            ),
        }
    })();

    outcome.log(worktree_dir);
    outcome
}

#[cfg(test)]
#[path = "env_file_tests.rs"]
mod tests;
