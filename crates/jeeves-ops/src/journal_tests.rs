// SPDX-License-Identifier: MIT

use super::*;
use jeeves_core::SystemClock;
use tempfile::tempdir;

fn op_id() -> OperationId {
    OperationId::parse("op-00000001").unwrap()
}

fn issue_ref() -> IssueRef {
    IssueRef::parse("acme/widgets#42").unwrap()
}

#[test]
fn journal_state_rejects_malformed_strings() {
    assert!(JournalState::parse("cred.validating").is_ok());
    assert!(JournalState::parse("ingest.recording_status").is_ok());
    assert!(JournalState::parse("pr.checking_existing").is_ok());
    assert!(JournalState::parse("CRED.validating").is_err());
    assert!(JournalState::parse("unknown.state").is_err());
    assert!(JournalState::parse("cred.Validating").is_err());
}

#[test]
fn create_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let journal = create_journal(
        dir.path(),
        op_id(),
        JournalKind::Credentials,
        issue_ref(),
        Some(Provider::Claude),
        JournalState::parse("cred.validating").unwrap(),
        &SystemClock,
    )
    .unwrap();
    assert!(journal.completed_at.is_none());

    let reloaded = read_journal(dir.path()).unwrap().unwrap();
    assert_eq!(reloaded.state, JournalState::parse("cred.validating").unwrap());
}

#[test]
fn update_state_preserves_other_fields() {
    let dir = tempdir().unwrap();
    create_journal(
        dir.path(),
        op_id(),
        JournalKind::Ingest,
        issue_ref(),
        None,
        JournalState::parse("ingest.validating").unwrap(),
        &SystemClock,
    )
    .unwrap();

    let updated =
        update_journal_state(dir.path(), JournalState::parse("ingest.recording_status").unwrap(), &SystemClock)
            .unwrap();
    assert_eq!(updated.operation_id, op_id());
    assert_eq!(updated.issue_ref, issue_ref());
}

#[test]
fn update_checkpoint_merges_without_clobbering_unset_fields() {
    let dir = tempdir().unwrap();
    create_journal(
        dir.path(),
        op_id(),
        JournalKind::Ingest,
        issue_ref(),
        None,
        JournalState::parse("ingest.validating").unwrap(),
        &SystemClock,
    )
    .unwrap();

    update_journal_checkpoint(
        dir.path(),
        CheckpointPatch { remote_id: Some(Some("r1".to_string())), ..Default::default() },
        &SystemClock,
    )
    .unwrap();

    let journal = update_journal_checkpoint(
        dir.path(),
        CheckpointPatch { issue_state_persisted: Some(true), ..Default::default() },
        &SystemClock,
    )
    .unwrap();

    assert_eq!(journal.checkpoint.remote_id, Some("r1".to_string()));
    assert!(journal.checkpoint.issue_state_persisted);
}

#[test]
fn checkpoint_warnings_are_truncated_per_item_and_by_count() {
    let dir = tempdir().unwrap();
    create_journal(
        dir.path(),
        op_id(),
        JournalKind::Ingest,
        issue_ref(),
        None,
        JournalState::parse("ingest.validating").unwrap(),
        &SystemClock,
    )
    .unwrap();

    let long_warning = "x".repeat(1000);
    let many_warnings: Vec<String> = (0..60).map(|i| format!("warning-{i}")).collect();
    let journal = update_journal_checkpoint(
        dir.path(),
        CheckpointPatch { warnings: Some(many_warnings), ..Default::default() },
        &SystemClock,
    )
    .unwrap();
    assert_eq!(journal.checkpoint.warnings.len(), 50);

    let journal = update_journal_checkpoint(
        dir.path(),
        CheckpointPatch { warnings: Some(vec![long_warning.clone()]), ..Default::default() },
        &SystemClock,
    )
    .unwrap();
    assert_eq!(journal.checkpoint.warnings[0].len(), 512);
    assert_ne!(journal.checkpoint.warnings[0], long_warning);
}

#[test]
fn finalize_stamps_completed_at() {
    let dir = tempdir().unwrap();
    create_journal(
        dir.path(),
        op_id(),
        JournalKind::PrPrepare,
        issue_ref(),
        Some(Provider::Codex),
        JournalState::parse("pr.checking_existing").unwrap(),
        &SystemClock,
    )
    .unwrap();

    let journal = finalize_journal(dir.path(), JournalState::parse("pr.checking_existing").unwrap(), &SystemClock)
        .unwrap();
    assert!(journal.completed_at.is_some());
}

#[test]
fn delete_reports_whether_journal_existed() {
    let dir = tempdir().unwrap();
    assert!(!delete_journal(dir.path()).unwrap());
    create_journal(
        dir.path(),
        op_id(),
        JournalKind::Credentials,
        issue_ref(),
        None,
        JournalState::parse("cred.validating").unwrap(),
        &SystemClock,
    )
    .unwrap();
    assert!(delete_journal(dir.path()).unwrap());
    assert!(read_journal(dir.path()).unwrap().is_none());
}
