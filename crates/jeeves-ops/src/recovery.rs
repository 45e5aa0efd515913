// SPDX-License-Identifier: MIT

//! `detectRecovery`: whether an interrupted operation needs resuming, and
//! which state to resume it at.

use std::path::Path;

use crate::errors::OpsError;
use crate::journal::{read_journal, Journal, JournalKind, JournalState};

/// Outcome of [`detect_recovery`].
#[derive(Debug, Clone)]
pub enum RecoveryOutcome {
    NotNeeded,
    Needed { journal: Journal, recovery_state: JournalState },
}

#[allow(clippy::expect_used)]
fn state(raw: &str) -> JournalState {
    JournalState::parse(raw).expect("recovery table states are constants matching the state pattern")
}

/// Compute the resume state from `(kind, state, checkpoint)`, per the
/// exhaustive recovery table. `remote_id` dominates `issue_state_persisted`
/// for `ingest`: once the remote artifact exists, re-creating it would be
/// wasteful and could duplicate it; once local state is persisted, only
/// the recording step remains.
fn recovery_state_for(journal: &Journal) -> JournalState {
    match journal.kind {
        JournalKind::Credentials => {
            const MID_FLIGHT: &[&str] = &[
                "cred.persisting_secret",
                "cred.reconciling_worktree",
                "cred.recording_status",
                "cred.emitting_event",
            ];
            if MID_FLIGHT.contains(&journal.state.as_str()) {
                state("cred.reconciling_worktree")
            } else {
                state("cred.validating")
            }
        }
        JournalKind::Ingest => {
            if journal.checkpoint.remote_id.is_some() {
                state("ingest.persisting_issue_state")
            } else if journal.checkpoint.issue_state_persisted {
                state("ingest.recording_status")
            } else {
                state("ingest.validating")
            }
        }
        JournalKind::PrPrepare => state("pr.checking_existing"),
    }
}

/// `needed:true` iff a journal exists and `completed_at == null`.
pub fn detect_recovery(issue_dir: &Path) -> Result<RecoveryOutcome, OpsError> {
    let Some(journal) = read_journal(issue_dir)? else {
        return Ok(RecoveryOutcome::NotNeeded);
    };
    if journal.completed_at.is_some() {
        return Ok(RecoveryOutcome::NotNeeded);
    }
    let recovery_state = recovery_state_for(&journal);
    Ok(RecoveryOutcome::Needed { journal, recovery_state })
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
