// SPDX-License-Identifier: MIT

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsError {
    #[error("failed to read {path}: {source}", path = path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse {path}: {source}", path = path.display())]
    Decode { path: PathBuf, source: serde_json::Error },

    #[error("failed to encode a managed document for {path}: {source}", path = path.display())]
    Encode { path: PathBuf, source: serde_json::Error },

    #[error("failed to write {path}: {source}", path = path.display())]
    Write { path: PathBuf, source: jeeves_core::FsAtomicError },
}
