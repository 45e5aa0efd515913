// SPDX-License-Identifier: MIT

use proptest::prelude::*;

use crate::graph::{Task, TaskStatus};
use crate::schedule::schedule;

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Pending),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Passed),
        Just(TaskStatus::Failed),
        Just(TaskStatus::Blocked),
    ]
}

fn arb_tasks(max_len: usize) -> impl Strategy<Value = Vec<Task>> {
    proptest::collection::vec(arb_status(), 1..max_len).prop_map(|statuses| {
        statuses
            .into_iter()
            .enumerate()
            .map(|(i, status)| Task { id: format!("t{i}"), status, depends_on: Vec::new() })
            .collect()
    })
}

proptest! {
    #[test]
    fn schedule_is_deterministic_for_any_dependency_free_graph(tasks in arb_tasks(12)) {
        let first = schedule(&tasks, tasks.len()).unwrap();
        let second = schedule(&tasks, tasks.len()).unwrap();
        prop_assert_eq!(
            first.iter().map(|t| t.id.clone()).collect::<Vec<_>>(),
            second.iter().map(|t| t.id.clone()).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn schedule_never_selects_in_progress_or_blocked_or_passed(tasks in arb_tasks(12)) {
        let selected = schedule(&tasks, tasks.len()).unwrap();
        for task in &selected {
            prop_assert!(matches!(task.status, TaskStatus::Pending | TaskStatus::Failed));
        }
    }

    #[test]
    fn schedule_never_returns_more_than_max_parallel(tasks in arb_tasks(12), max_parallel in 0usize..8) {
        let selected = schedule(&tasks, max_parallel).unwrap();
        prop_assert!(selected.len() <= max_parallel);
    }

    #[test]
    fn schedule_orders_failed_before_pending_at_equal_index(tasks in arb_tasks(12)) {
        let selected = schedule(&tasks, tasks.len()).unwrap();
        let mut seen_pending = false;
        for task in &selected {
            if task.status == TaskStatus::Pending {
                seen_pending = true;
            }
            if task.status == TaskStatus::Failed {
                prop_assert!(!seen_pending, "a failed task appeared after a pending task");
            }
        }
    }
}
