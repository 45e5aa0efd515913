// SPDX-License-Identifier: MIT

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;

use jeeves_core::{encode_canonical, reap_temps, write_atomic, Clock};
use serde_json::Value;

use crate::errors::{SecretReadError, SecretWriteError};
use crate::kind::SecretKind;

/// Where a secret of kind `K` lives: `<issueDir>/.secrets/<K::NAME>.json`.
pub struct SecretContext {
    dir: PathBuf,
}

impl SecretContext {
    pub fn new(issue_dir: impl Into<PathBuf>) -> Self {
        SecretContext { dir: issue_dir.into().join(".secrets") }
    }

    fn path_for<K: SecretKind>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", K::NAME))
    }
}

/// Result of [`SecretStore::read`] — absence and validation failure are
/// indistinguishable by design (§4.B: "rejected files produce
/// `{exists:false}` — never raise").
#[derive(Debug, Clone)]
pub enum ReadOutcome<R> {
    Exists(R),
    Absent,
}

impl<R> ReadOutcome<R> {
    pub fn exists(&self) -> bool {
        matches!(self, ReadOutcome::Exists(_))
    }

    pub fn into_record(self) -> Option<R> {
        match self {
            ReadOutcome::Exists(record) => Some(record),
            ReadOutcome::Absent => None,
        }
    }
}

/// The Secret Store, monomorphized per [`SecretKind`]. Holds no state of its
/// own — every call takes a [`SecretContext`] naming the issue directory.
pub struct SecretStore<K> {
    _kind: PhantomData<K>,
}

impl<K: SecretKind> SecretStore<K> {
    /// Construct the canonical record, encode with sorted keys, and write it
    /// via the atomic writer at mode 0600.
    pub fn write(ctx: &SecretContext, fields: K::Fields, clock: &impl Clock) -> Result<K::Record, SecretWriteError> {
        let path = ctx.path_for::<K>();
        let record = K::build(fields, clock.iso8601());
        let secret_values = K::secret_values(&record);

        let bytes = encode_canonical(&record).map_err(|e| SecretWriteError::from_encode(&path, e))?;
        write_atomic(&path, &bytes, 0o600, clock).map_err(|e| {
            let wrapped = SecretWriteError::from_fs_atomic(&path, e, &secret_values);
            tracing::warn!(path = %wrapped.path.display(), os_code = ?wrapped.os_code, "failed to write secret file");
            wrapped
        })?;
        Ok(record)
    }

    /// Absence or any parse/validation failure reads as [`ReadOutcome::Absent`].
    /// Any I/O error that is not "file not found" surfaces typed.
    pub fn read(ctx: &SecretContext) -> Result<ReadOutcome<K::Record>, SecretReadError> {
        let path = ctx.path_for::<K>();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ReadOutcome::Absent),
            Err(e) => return Err(SecretReadError::from_io(&path, &e, &[])),
        };

        let Ok(value) = serde_json::from_slice::<Value>(&bytes) else {
            return Ok(ReadOutcome::Absent);
        };

        match K::validate(&value) {
            Some(record) => Ok(ReadOutcome::Exists(record)),
            None => Ok(ReadOutcome::Absent),
        }
    }

    pub fn has(ctx: &SecretContext) -> Result<bool, SecretReadError> {
        Ok(Self::read(ctx)?.exists())
    }

    /// Remove the final file (reporting whether it existed) and reap any
    /// orphaned temp files, even when the final file was already absent.
    pub fn delete(ctx: &SecretContext) -> Result<bool, SecretReadError> {
        let path = ctx.path_for::<K>();
        let existed = path.exists();
        reap_temps(&path).map_err(|e| SecretReadError::from_io(&path, &e, &[]))?;
        Ok(existed)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
