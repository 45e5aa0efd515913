// SPDX-License-Identifier: MIT

//! The per-issue lock: `{schemaVersion, operation_id, issue_ref,
//! acquired_at, expires_at, pid}`, plus acquire/refresh/release and the
//! staleness predicate.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jeeves_core::{encode_canonical, is_alive, reap_temps, write_atomic, Clock, IssueRef, OperationId};
use serde::{Deserialize, Serialize};

use crate::errors::OpsError;

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lock {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,
    pub operation_id: OperationId,
    pub issue_ref: IssueRef,
    pub acquired_at: u64,
    pub expires_at: u64,
    pub pid: u32,
}

impl Lock {
    /// Stale iff expired or the owning process is no longer alive. Any
    /// error from the liveness probe is interpreted as "not alive", which
    /// can only make a lock stale sooner — never incorrectly hold one open.
    pub fn is_stale(&self, now_ms: u64) -> bool {
        self.expires_at < now_ms || !is_alive(self.pid)
    }
}

/// Outcome of [`acquire_lock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    Acquired { operation_id: OperationId },
    Busy,
    StaleCleaned,
}

fn lock_path(issue_dir: &Path) -> PathBuf {
    issue_dir.join(".ops").join("provider-operation.lock")
}

fn read_lock(path: &Path) -> Result<Option<Lock>, OpsError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(OpsError::Read { path: path.to_path_buf(), source }),
    };
    // A lock file that fails to parse as a valid Lock is not a valid lock;
    // treat it the same as absent so a fresh acquire can proceed.
    Ok(serde_json::from_slice(&bytes).ok())
}

fn persist_lock(path: &Path, lock: &Lock, clock: &impl Clock) -> Result<(), OpsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| OpsError::CreateDir { path: parent.to_path_buf(), source })?;
    }
    let bytes =
        encode_canonical(lock).map_err(|source| OpsError::Encode { path: path.to_path_buf(), source })?;
    write_atomic(path, &bytes, 0o600, clock).map_err(|source| OpsError::Write { path: path.to_path_buf(), source })
}

/// Acquire the per-issue lock. `timeout_ms` defaults to
/// [`jeeves_core::env::DEFAULT_LOCK_TIMEOUT_MS`].
pub fn acquire_lock(
    issue_dir: &Path,
    operation_id: OperationId,
    issue_ref: IssueRef,
    timeout_ms: Option<u64>,
    clock: &impl Clock,
) -> Result<AcquireOutcome, OpsError> {
    let timeout_ms = timeout_ms.unwrap_or_else(|| jeeves_core::env::lock_timeout().as_millis() as u64);
    let path = lock_path(issue_dir);

    if let Some(existing) = read_lock(&path)? {
        let now_ms = clock.epoch_ms();
        if !existing.is_stale(now_ms) {
            tracing::info!(issue_dir = %issue_dir.display(), held_by = existing.pid, "lock busy");
            return Ok(AcquireOutcome::Busy);
        }
        release_lock(issue_dir)?;
        tracing::warn!(issue_dir = %issue_dir.display(), stale_pid = existing.pid, "stale lock cleaned");
        return Ok(AcquireOutcome::StaleCleaned);
    }

    let now_ms = clock.epoch_ms();
    let lock = Lock {
        schema_version: SCHEMA_VERSION,
        operation_id: operation_id.clone(),
        issue_ref,
        acquired_at: now_ms,
        expires_at: now_ms + timeout_ms,
        pid: std::process::id(),
    };
    persist_lock(&path, &lock, clock)?;
    tracing::info!(issue_dir = %issue_dir.display(), operation_id = %operation_id, "lock acquired");
    Ok(AcquireOutcome::Acquired { operation_id })
}

/// Extend `expires_at` on the current lock. Returns `false` if no lock
/// exists.
pub fn refresh_lock(issue_dir: &Path, timeout_ms: u64, clock: &impl Clock) -> Result<bool, OpsError> {
    let path = lock_path(issue_dir);
    let Some(mut lock) = read_lock(&path)? else {
        return Ok(false);
    };
    lock.expires_at = clock.epoch_ms() + timeout_ms;
    persist_lock(&path, &lock, clock)?;
    tracing::info!(issue_dir = %issue_dir.display(), operation_id = %lock.operation_id, "lock refreshed");
    Ok(true)
}

/// Idempotent lock removal.
pub fn release_lock(issue_dir: &Path) -> Result<(), OpsError> {
    let path = lock_path(issue_dir);
    reap_temps(&path).map_err(|source| OpsError::Read { path, source })
}

pub(crate) fn current_lock(issue_dir: &Path) -> Result<Option<Lock>, OpsError> {
    read_lock(&lock_path(issue_dir))
}

/// RAII guard returned on a successful [`acquire_lock`]. Its `Drop` impl
/// releases the lock; call [`OperationGuard::release`] to control timing
/// explicitly. Double release is a no-op.
pub struct OperationGuard {
    issue_dir: PathBuf,
    released: bool,
}

impl OperationGuard {
    pub fn new(issue_dir: impl Into<PathBuf>) -> Self {
        OperationGuard { issue_dir: issue_dir.into(), released: false }
    }

    /// Release the lock now instead of waiting for drop.
    pub fn release(mut self) {
        self.do_release();
    }

    fn do_release(&mut self) {
        if !self.released {
            self.released = true;
            let _ = release_lock(&self.issue_dir);
        }
    }
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.do_release();
    }
}

impl AcquireOutcome {
    /// Build the RAII guard for a successful acquire; `None` for
    /// `Busy`/`StaleCleaned`.
    pub fn into_guard(self, issue_dir: impl Into<PathBuf>) -> Option<OperationGuard> {
        match self {
            AcquireOutcome::Acquired { .. } => Some(OperationGuard::new(issue_dir)),
            AcquireOutcome::Busy | AcquireOutcome::StaleCleaned => None,
        }
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
