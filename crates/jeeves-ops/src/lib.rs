// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jeeves-ops: the per-issue operation lock and journal.
//!
//! Exactly one process mutates a given issue's state at a time
//! ([`lock`]), and every mutation is resumable after arbitrary termination
//! ([`journal`], [`recovery`]). [`cleanup`] sweeps what a crashed process
//! left behind.

mod cleanup;
mod errors;
mod journal;
mod lock;
mod recovery;

pub use cleanup::{cleanup_stale_artifacts, delete_ops_artifacts, CleanupReport};
pub use errors::OpsError;
pub use journal::{
    create_journal, delete_journal, finalize_journal, read_journal, update_journal_checkpoint,
    update_journal_state, Checkpoint, CheckpointPatch, Journal, JournalKind, JournalState, JournalStateError,
    Provider,
};
pub use lock::{acquire_lock, refresh_lock, release_lock, AcquireOutcome, Lock, OperationGuard};
pub use recovery::{detect_recovery, RecoveryOutcome};
