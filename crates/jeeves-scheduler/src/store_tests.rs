// SPDX-License-Identifier: MIT

use super::*;
use jeeves_core::SystemClock;
use tempfile::tempdir;

fn task(id: &str, status: TaskStatus, depends_on: &[&str]) -> Task {
    Task { id: id.to_string(), status, depends_on: depends_on.iter().map(|s| s.to_string()).collect() }
}

#[test]
fn put_tasks_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let store = TaskGraphStore::new(dir.path());
    let tasks = vec![task("a", TaskStatus::Pending, &[])];
    store.put_tasks(tasks, &SystemClock).unwrap();

    let graph = store.read().unwrap().unwrap();
    assert_eq!(graph.tasks.len(), 1);
    assert_eq!(graph.tasks[0].id, "a");
}

#[test]
fn put_tasks_rejects_invalid_graph_without_persisting() {
    let dir = tempdir().unwrap();
    let store = TaskGraphStore::new(dir.path());
    let tasks = vec![task("a", TaskStatus::Pending, &["ghost"])];
    assert!(store.put_tasks(tasks, &SystemClock).is_err());
    assert!(store.read().unwrap().is_none());
}

#[test]
fn set_task_status_mutates_in_place() {
    let dir = tempdir().unwrap();
    let store = TaskGraphStore::new(dir.path());
    store.put_tasks(vec![task("a", TaskStatus::Pending, &[])], &SystemClock).unwrap();

    let graph = store.set_task_status("a", TaskStatus::Failed, &SystemClock).unwrap();
    assert_eq!(graph.tasks[0].status, TaskStatus::Failed);

    let reloaded = store.read().unwrap().unwrap();
    assert_eq!(reloaded.tasks[0].status, TaskStatus::Failed);
}

#[test]
fn set_task_status_rejects_unknown_id() {
    let dir = tempdir().unwrap();
    let store = TaskGraphStore::new(dir.path());
    store.put_tasks(vec![task("a", TaskStatus::Pending, &[])], &SystemClock).unwrap();

    let err = store.set_task_status("ghost", TaskStatus::Failed, &SystemClock).unwrap_err();
    assert!(matches!(err, SchedulerError::TaskNotFound { .. }));
}

#[test]
fn set_task_status_allows_retry_from_failed_back_to_pending() {
    let dir = tempdir().unwrap();
    let store = TaskGraphStore::new(dir.path());
    store.put_tasks(vec![task("a", TaskStatus::Failed, &[])], &SystemClock).unwrap();
    let graph = store.set_task_status("a", TaskStatus::Pending, &SystemClock).unwrap();
    assert_eq!(graph.tasks[0].status, TaskStatus::Pending);
}

#[test]
fn schedule_reads_persisted_graph_and_selects() {
    let dir = tempdir().unwrap();
    let store = TaskGraphStore::new(dir.path());
    store
        .put_tasks(
            vec![task("a", TaskStatus::Pending, &[]), task("b", TaskStatus::Failed, &[])],
            &SystemClock,
        )
        .unwrap();

    let selected = store.schedule(5).unwrap();
    assert_eq!(selected.iter().map(|t| t.id.clone()).collect::<Vec<_>>(), vec!["b", "a"]);
}

#[test]
fn read_of_absent_graph_is_none_not_an_error() {
    let dir = tempdir().unwrap();
    let store = TaskGraphStore::new(dir.path());
    assert!(store.read().unwrap().is_none());
}
