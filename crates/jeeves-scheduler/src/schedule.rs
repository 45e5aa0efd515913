// SPDX-License-Identifier: MIT

//! Readiness and deterministic selection ordering.

use std::collections::HashMap;

use crate::graph::{GraphValidationError, Task, TaskStatus};

/// A task is ready iff its own status is retryable and every dependency has
/// passed. `in_progress` is never ready; `blocked` is never ready either
/// (it is not in the retryable set).
pub fn is_ready(task: &Task, status_by_id: &HashMap<&str, TaskStatus>) -> bool {
    let own_status_retryable = matches!(task.status, TaskStatus::Pending | TaskStatus::Failed);
    if !own_status_retryable {
        return false;
    }
    task.depends_on
        .iter()
        .all(|dep| matches!(status_by_id.get(dep.as_str()), Some(TaskStatus::Passed)))
}

fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::Failed => 0,
        TaskStatus::Pending => 1,
        // Unreachable for ready tasks, but kept total so sorting never panics.
        TaskStatus::InProgress => 2,
        TaskStatus::Passed => 3,
        TaskStatus::Blocked => 4,
    }
}

/// Validate, then select the first `max_parallel` ready tasks under the
/// total order: status rank (failed before pending), then original index,
/// then task id. Deterministic across repeated calls on the same input.
pub fn schedule(tasks: &[Task], max_parallel: usize) -> Result<Vec<Task>, GraphValidationError> {
    crate::graph::validate_task_graph(tasks)?;

    let status_by_id: HashMap<&str, TaskStatus> = tasks.iter().map(|t| (t.id.as_str(), t.status)).collect();

    let mut ready: Vec<(usize, &Task)> =
        tasks.iter().enumerate().filter(|(_, t)| is_ready(t, &status_by_id)).collect();

    ready.sort_by(|(ia, a), (ib, b)| {
        status_rank(a.status).cmp(&status_rank(b.status)).then(ia.cmp(ib)).then(a.id.cmp(&b.id))
    });

    let selected: Vec<Task> = ready.into_iter().take(max_parallel).map(|(_, t)| t.clone()).collect();
    tracing::info!(
        selected = ?selected.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        max_parallel,
        "scheduler selection"
    );
    Ok(selected)
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
