// SPDX-License-Identifier: MIT

//! Atomic file writer: temp-file + rename, with per-PID-unique temp names,
//! explicit mode enforcement, and orphan-temp cleanup.
//!
//! Every other mutating component (`jeeves-secrets`, `jeeves-ops`,
//! `jeeves-worktree`, `jeeves-diagnostics`) writes its managed JSON/env
//! files through [`write_atomic`] rather than `std::fs::write` directly, so
//! the atomicity property in the spec's testable-properties section holds
//! crate-wide rather than per-component.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::clock::Clock;

/// I/O-transient error taxonomy for the atomic writer. Each variant carries
/// the path involved and the originating `io::Error` so callers can recover
/// the OS error code without parsing a message string.
#[derive(Debug, thiserror::Error)]
pub enum FsAtomicError {
    #[error("failed to create parent directory {path}: {source}", path = path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write temp file {path}: {source}", path = path.display())]
    WriteTemp { path: PathBuf, source: io::Error },

    #[error("failed to set permissions on {path}: {source}", path = path.display())]
    SetPermissions { path: PathBuf, source: io::Error },

    #[error("failed to rename {from} to {to}: {source}", from = from.display(), to = to.display())]
    Rename { from: PathBuf, to: PathBuf, source: io::Error },

    #[error("failed to remove stale target {path} during rename fallback: {source}", path = path.display())]
    RemoveTarget { path: PathBuf, source: io::Error },
}

impl FsAtomicError {
    /// The underlying OS error code, when one is available.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            FsAtomicError::CreateDir { source, .. }
            | FsAtomicError::WriteTemp { source, .. }
            | FsAtomicError::SetPermissions { source, .. }
            | FsAtomicError::Rename { source, .. }
            | FsAtomicError::RemoveTarget { source, .. } => source.raw_os_error(),
        }
    }
}

fn temp_path_for(path: &Path, pid: u32, monotonic_ms: u64) -> PathBuf {
    let mut name: OsString = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{pid}.{monotonic_ms}.tmp"));
    path.with_file_name(name)
}

/// Write `bytes` to `path` atomically: parent-dir creation, temp-file write
/// at `mode`, rename onto the final path. Tolerates the final path already
/// existing (removes it and retries the rename once, covering platforms
/// where `rename` doesn't silently replace an existing file).
pub fn write_atomic(
    path: &Path,
    bytes: &[u8],
    mode: u32,
    clock: &impl Clock,
) -> Result<(), FsAtomicError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|source| FsAtomicError::CreateDir { path: parent.to_path_buf(), source })?;
        }
    }

    let tmp_path = temp_path_for(path, std::process::id(), clock.monotonic_ms());

    let write_result = write_temp(&tmp_path, bytes, mode);
    if let Err(e) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(rename_err) if rename_err.kind() == io::ErrorKind::AlreadyExists => {
            fs::remove_file(path)
                .map_err(|source| FsAtomicError::RemoveTarget { path: path.to_path_buf(), source })?;
            fs::rename(&tmp_path, path).map_err(|source| {
                let _ = fs::remove_file(&tmp_path);
                FsAtomicError::Rename { from: tmp_path.clone(), to: path.to_path_buf(), source }
            })
        }
        Err(source) => {
            let _ = fs::remove_file(&tmp_path);
            Err(FsAtomicError::Rename { from: tmp_path, to: path.to_path_buf(), source })
        }
    }
}

fn write_temp(tmp_path: &Path, bytes: &[u8], mode: u32) -> Result<(), FsAtomicError> {
    fs::write(tmp_path, bytes)
        .map_err(|source| FsAtomicError::WriteTemp { path: tmp_path.to_path_buf(), source })?;
    set_mode(tmp_path, mode)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), FsAtomicError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|source| FsAtomicError::SetPermissions { path: path.to_path_buf(), source })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), FsAtomicError> {
    // Non-unix platforms have no POSIX mode bits; creation succeeded, so
    // there's nothing further to enforce here.
    Ok(())
}

/// Remove `path` (tolerating absence) and any sibling temp files left behind
/// by a crashed [`write_atomic`] call — `<basename>.<pid>.<ms>.tmp` or any
/// other `<basename>*.tmp`.
///
/// Called by every component's `delete` operation and by
/// `cleanupStaleArtifacts` at startup, so an orphaned temp never leaks
/// plaintext secrets past a crash.
pub fn reap_temps(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let Some(dir) = path.parent() else { return Ok(()) };
    let Some(basename) = path.file_name().and_then(|n| n.to_str()) else { return Ok(()) };

    let dir_entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    for entry in dir_entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if is_orphan_temp(name, basename) {
            let _ = fs::remove_file(entry.path());
        }
    }

    Ok(())
}

fn is_orphan_temp(name: &str, basename: &str) -> bool {
    name.starts_with(basename) && name.ends_with(".tmp") && name.len() > basename.len()
}

#[cfg(test)]
#[path = "fsatomic_tests.rs"]
mod tests;
