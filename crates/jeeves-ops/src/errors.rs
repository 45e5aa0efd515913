// SPDX-License-Identifier: MIT

use std::path::PathBuf;

/// Error taxonomy for every mutating call in this crate. Validation failures
/// (malformed `OperationId`/`IssueRef`, malformed `JournalState`) are raised
/// by their newtypes before any side effect runs, per the documented
/// "validation failures raise before any side effect" contract — this enum
/// only needs to cover what can go wrong once a side effect has started.
#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    #[error("failed to create directory {path}: {source}", path = path.display())]
    CreateDir { path: PathBuf, source: std::io::Error },

    #[error("failed to read {path}: {source}", path = path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse {path}: {source}", path = path.display())]
    Decode { path: PathBuf, source: serde_json::Error },

    #[error("failed to encode a managed document for {path}: {source}", path = path.display())]
    Encode { path: PathBuf, source: serde_json::Error },

    #[error("failed to write {path}: {source}", path = path.display())]
    Write { path: PathBuf, source: jeeves_core::FsAtomicError },

    #[error("no journal found at {path}", path = path.display())]
    NoJournal { path: PathBuf },
}
