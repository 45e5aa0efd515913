// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// The precise failure taxonomy a reconcile call can land on. `InSync` is
/// the only success variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    InSync,
    DeferredWorktreeAbsent,
    FailedConflict,
    FailedLinkCreate,
    FailedSourceMissing,
    FailedExclude,
    FailedEnvWrite,
    FailedEnvDelete,
    FailedSecretRead,
    NeverAttempted,
}

impl SyncStatus {
    pub fn is_success(self) -> bool {
        matches!(self, SyncStatus::InSync)
    }
}

/// Result of a single reconcile call. `message`/`last_error` are always
/// already scrubbed of any secret value before construction.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub sync_status: SyncStatus,
    pub message: Option<String>,
    pub last_error: Option<String>,
}

impl ReconcileOutcome {
    pub fn success() -> Self {
        ReconcileOutcome { sync_status: SyncStatus::InSync, message: None, last_error: None }
    }

    pub fn failure(sync_status: SyncStatus, message: impl Into<String>, last_error: impl Into<String>) -> Self {
        ReconcileOutcome { sync_status, message: Some(message.into()), last_error: Some(last_error.into()) }
    }

    /// Emit a `tracing` event for this outcome: `info!` on `InSync`/
    /// `DeferredWorktreeAbsent`, `warn!` otherwise. `last_error` is already
    /// scrubbed of any secret value by the caller before construction.
    pub fn log(&self, worktree_dir: &std::path::Path) {
        match self.sync_status {
            SyncStatus::InSync | SyncStatus::DeferredWorktreeAbsent => {
                tracing::info!(
                    worktree_dir = %worktree_dir.display(),
                    sync_status = ?self.sync_status,
                    "reconcile outcome"
                );
            }
            _ => {
                tracing::warn!(
                    worktree_dir = %worktree_dir.display(),
                    sync_status = ?self.sync_status,
                    last_error = ?self.last_error,
                    "reconcile outcome"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
