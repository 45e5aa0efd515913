// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jeeves-worktree: reconciles the durable per-issue worktree against the
//! two things it carries but git does not: a secret-bearing env file and a
//! bag of managed files identified by content hash. Both reconcilers defer
//! rather than fail when the worktree does not exist yet, and both update
//! the VCS exclude list before any write so a crash never produces a
//! committable secret.

mod env_file;
mod exclude;
mod managed;
mod preconditions;
mod status;

pub use env_file::{encode_env_line, reconcile_env_file};
pub use exclude::ensure_exclude_patterns;
pub use managed::{reconcile_managed_files, ManagedFileSource};
pub use status::{ReconcileOutcome, SyncStatus};
