// SPDX-License-Identifier: MIT

//! Centralized environment variable access.
//!
//! The core never calls `std::env::var` outside this module — every
//! process-observed knob the library honors is documented and defaulted
//! here, mirroring how the teacher daemon centralizes its own `env` reads.

use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for `acquireLock`, used when the caller doesn't specify one
/// and `JEEVES_LOCK_TIMEOUT_MS` is unset.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 30_000;

/// Selects the active issue directory for an embedded state server.
///
/// The core never reads this itself — it is documented here because an
/// embedding binary reads it and passes the resolved path down into the
/// library's `issueDir`-taking APIs.
pub fn mcp_state_dir() -> Option<PathBuf> {
    std::env::var_os("MCP_STATE_DIR").map(PathBuf::from)
}

/// Per-provider model selection (e.g. `JEEVES_MODEL`). Opaque to the core;
/// forwarded verbatim to provider adapters, which live outside this crate.
pub fn provider_model() -> Option<String> {
    std::env::var("JEEVES_MODEL").ok().filter(|s| !s.is_empty())
}

/// Overrides [`DEFAULT_LOCK_TIMEOUT_MS`] for `acquireLock` callers that don't
/// pass an explicit timeout.
pub fn lock_timeout() -> Duration {
    std::env::var("JEEVES_LOCK_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(DEFAULT_LOCK_TIMEOUT_MS))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
