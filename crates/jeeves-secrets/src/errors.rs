// SPDX-License-Identifier: MIT

//! Error types for the secret store. Both carry a pre-sanitized message —
//! never a raw `io::Error`/`FsAtomicError` — so a secret value can never
//! leak through `Display`/`Debug` once it has been scrubbed once at
//! construction time.

use std::path::PathBuf;

use jeeves_core::FsAtomicError;

fn sanitize(mut message: String, secret_values: &[String]) -> String {
    for value in secret_values {
        if value.is_empty() {
            continue;
        }
        message = message.replace(value.as_str(), "[REDACTED]");
    }
    message
}

/// A read/has/delete call failed for a reason other than "file does not
/// exist" — a permissions error, a transient I/O error, and so on.
#[derive(Debug, thiserror::Error)]
#[error("failed to read secret file {path}: {message}")]
pub struct SecretReadError {
    pub path: PathBuf,
    pub message: String,
    pub os_code: Option<i32>,
}

impl SecretReadError {
    pub(crate) fn from_io(path: &std::path::Path, source: &std::io::Error, secret_values: &[String]) -> Self {
        SecretReadError {
            path: path.to_path_buf(),
            message: sanitize(source.to_string(), secret_values),
            os_code: source.raw_os_error(),
        }
    }
}

/// A write call failed — always an I/O-transient failure from the atomic
/// writer, since record construction itself cannot fail.
#[derive(Debug, thiserror::Error)]
#[error("failed to write secret file {path}: {message}")]
pub struct SecretWriteError {
    pub path: PathBuf,
    pub message: String,
    pub os_code: Option<i32>,
}

impl SecretWriteError {
    pub(crate) fn from_fs_atomic(path: &std::path::Path, source: FsAtomicError, secret_values: &[String]) -> Self {
        SecretWriteError {
            path: path.to_path_buf(),
            message: sanitize(source.to_string(), secret_values),
            os_code: source.os_code(),
        }
    }

    pub(crate) fn from_encode(path: &std::path::Path, source: serde_json::Error) -> Self {
        SecretWriteError { path: path.to_path_buf(), message: source.to_string(), os_code: None }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
