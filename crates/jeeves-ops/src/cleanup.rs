// SPDX-License-Identifier: MIT

//! Startup cleanup: drop a stale lock, delete a completed journal, sweep
//! orphaned temp files — three idempotent actions, always in that order.

use std::fs;
use std::io;
use std::path::Path;

use jeeves_core::Clock;

use crate::errors::OpsError;
use crate::journal::{journal_path, read_journal};
use crate::lock::{current_lock, release_lock};

/// Counts from a [`cleanup_stale_artifacts`] pass, for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub lock_removed: bool,
    pub journal_removed: bool,
    pub temp_files_removed: usize,
}

/// Remove every lock/journal file's `.ops/` sibling temp files; tolerant of
/// `.ops/` not existing.
fn sweep_ops_temp_files(issue_dir: &Path) -> io::Result<usize> {
    let ops_dir = issue_dir.join(".ops");
    let entries = match fs::read_dir(&ops_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(".tmp") {
            if fs::remove_file(entry.path()).is_ok() {
                removed += 1;
            }
        }
    }
    Ok(removed)
}

/// Drop a stale lock, delete a completed journal, sweep `*.tmp` inside
/// `.ops/` — in that order. Never deletes an in-flight (uncompleted)
/// journal.
pub fn cleanup_stale_artifacts(issue_dir: &Path, clock: &impl Clock) -> Result<CleanupReport, OpsError> {
    let mut report = CleanupReport::default();

    if let Some(lock) = current_lock(issue_dir)? {
        if lock.is_stale(clock.epoch_ms()) {
            release_lock(issue_dir)?;
            report.lock_removed = true;
        }
    }

    if let Some(journal) = read_journal(issue_dir)? {
        if journal.completed_at.is_some() {
            let path = journal_path(issue_dir);
            jeeves_core::reap_temps(&path).map_err(|source| OpsError::Read { path, source })?;
            report.journal_removed = true;
        }
    }

    report.temp_files_removed =
        sweep_ops_temp_files(issue_dir).map_err(|source| OpsError::Read { path: issue_dir.join(".ops"), source })?;

    Ok(report)
}

/// Remove both lock and journal, plus any orphaned temp files in `.ops/`.
pub fn delete_ops_artifacts(issue_dir: &Path) -> Result<(), OpsError> {
    release_lock(issue_dir)?;
    let path = journal_path(issue_dir);
    jeeves_core::reap_temps(&path).map_err(|source| OpsError::Read { path, source })?;
    Ok(())
}

#[cfg(test)]
#[path = "cleanup_tests.rs"]
mod tests;
