// SPDX-License-Identifier: MIT

use super::*;
use jeeves_core::SystemClock;
use tempfile::tempdir;

fn entry(id: &str, kind: MemoryKind, content: &str) -> MemoryEntry {
    MemoryEntry { id: id.to_string(), kind, content: content.to_string() }
}

#[test]
fn groups_entries_into_their_fields_and_the_latest_objective_wins() {
    let entries = vec![
        entry("o1", MemoryKind::Objective, "first objective"),
        entry("h1", MemoryKind::Hypothesis, "maybe X"),
        entry("b1", MemoryKind::Blocker, "waiting on Y"),
        entry("o2", MemoryKind::Objective, "second objective"),
        entry("e1", MemoryKind::EvidenceLink, "file.rs:10"),
    ];
    let context = build_active_context(&entries);
    assert_eq!(context.current_objective, Some("second objective".to_string()));
    assert_eq!(context.open_hypotheses, vec!["maybe X".to_string()]);
    assert_eq!(context.blockers, vec!["waiting on Y".to_string()]);
    assert_eq!(context.required_evidence_links, vec!["file.rs:10".to_string()]);
}

#[test]
fn retire_missing_finds_entries_absent_from_the_next_iteration() {
    let previous = vec![entry("a", MemoryKind::Hypothesis, "A"), entry("b", MemoryKind::Blocker, "B")];
    let current = vec![entry("a", MemoryKind::Hypothesis, "A")];
    let retired = retire_missing(&previous, &current);
    assert_eq!(retired.len(), 1);
    assert_eq!(retired[0].id, "b");
}

#[test]
fn retire_missing_is_empty_when_nothing_disappeared() {
    let previous = vec![entry("a", MemoryKind::Hypothesis, "A")];
    let current = vec![entry("a", MemoryKind::Hypothesis, "A")];
    assert!(retire_missing(&previous, &current).is_empty());
}

#[test]
fn persist_active_context_writes_sorted_canonical_json() {
    let dir = tempdir().unwrap();
    let store = TrajectoryStore::new(dir.path());
    let entries = vec![entry("o1", MemoryKind::Objective, "ship it")];
    store.persist_active_context(&entries, &SystemClock).unwrap();

    let bytes = std::fs::read(dir.path().join("active_context.json")).unwrap();
    assert!(bytes.ends_with(b"\n"));
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.find("\"blockers\"").unwrap() < text.find("\"current_objective\"").unwrap());
}

#[test]
fn retire_and_persist_accumulates_across_calls() {
    let dir = tempdir().unwrap();
    let store = TrajectoryStore::new(dir.path());

    let iter1 = vec![entry("a", MemoryKind::Hypothesis, "A"), entry("b", MemoryKind::Blocker, "B")];
    let iter2 = vec![entry("a", MemoryKind::Hypothesis, "A")];
    let iter3: Vec<MemoryEntry> = vec![];

    store.retire_and_persist(&iter1, &iter2, &SystemClock).unwrap();
    store.retire_and_persist(&iter2, &iter3, &SystemClock).unwrap();

    let bytes = std::fs::read(dir.path().join("retired_trajectory.json")).unwrap();
    let retired: Vec<MemoryEntry> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(retired.len(), 2);
    assert_eq!(retired[0].id, "b");
    assert_eq!(retired[1].id, "a");
}

#[test]
fn retire_and_persist_does_not_write_when_nothing_retired() {
    let dir = tempdir().unwrap();
    let store = TrajectoryStore::new(dir.path());
    let entries = vec![entry("a", MemoryKind::Hypothesis, "A")];
    store.retire_and_persist(&entries, &entries, &SystemClock).unwrap();
    assert!(!dir.path().join("retired_trajectory.json").exists());
}
