// SPDX-License-Identifier: MIT

//! The task graph's in-memory shape and validation.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A task's lifecycle state. `Blocked` exists for callers that want to park
/// a task outside the scheduler's readiness calculation without deleting it;
/// the scheduler itself only ever selects from `Pending`/`Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Passed,
    Failed,
    Blocked,
}

/// A single node in the task graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub status: TaskStatus,
    #[serde(default, rename = "dependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

/// The whole graph, as persisted at `<issueDir>/tasks.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskGraph {
    pub tasks: Vec<Task>,
}

/// The three validation failure shapes `validate_task_graph` can raise.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GraphValidationError {
    #[error("duplicate task id {task_id:?} at indices {first_index} and {second_index}")]
    DuplicateId { task_id: String, first_index: usize, second_index: usize },

    #[error("task {task_id:?} depends on unknown task {missing_dependency:?}")]
    MissingDependency { task_id: String, missing_dependency: String },

    #[error("dependency cycle detected: {}", cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },
}

/// Three passes, in order: duplicate ids, dangling dependencies, cycles.
pub fn validate_task_graph(tasks: &[Task]) -> Result<(), GraphValidationError> {
    check_duplicate_ids(tasks)?;
    check_missing_dependencies(tasks)?;
    check_cycles(tasks)?;
    Ok(())
}

fn check_duplicate_ids(tasks: &[Task]) -> Result<(), GraphValidationError> {
    let mut seen: Vec<(usize, &str)> = Vec::new();
    for (index, task) in tasks.iter().enumerate() {
        if let Some(&(first_index, _)) = seen.iter().find(|(_, id)| *id == task.id) {
            return Err(GraphValidationError::DuplicateId {
                task_id: task.id.clone(),
                first_index,
                second_index: index,
            });
        }
        seen.push((index, task.id.as_str()));
    }
    Ok(())
}

fn check_missing_dependencies(tasks: &[Task]) -> Result<(), GraphValidationError> {
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    for task in tasks {
        for dep in &task.depends_on {
            if !ids.contains(dep.as_str()) {
                return Err(GraphValidationError::MissingDependency {
                    task_id: task.id.clone(),
                    missing_dependency: dep.clone(),
                });
            }
        }
    }
    Ok(())
}

/// DFS with an explicit recursion stack — a node reached while still `InProgress`
/// closes a cycle.
#[derive(PartialEq)]
enum Mark {
    InProgress,
    Done,
}

fn check_cycles(tasks: &[Task]) -> Result<(), GraphValidationError> {
    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut stack: Vec<&str> = Vec::new();

    for task in tasks {
        if marks.contains_key(task.id.as_str()) {
            continue;
        }
        if let Some(cycle) = visit(task.id.as_str(), &by_id, &mut marks, &mut stack) {
            return Err(GraphValidationError::CycleDetected { cycle });
        }
    }
    Ok(())
}

fn visit<'a>(
    id: &'a str,
    by_id: &HashMap<&'a str, &'a Task>,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    marks.insert(id, Mark::InProgress);
    stack.push(id);

    if let Some(task) = by_id.get(id) {
        for dep in &task.depends_on {
            let dep = dep.as_str();
            match marks.get(dep) {
                Some(Mark::InProgress) => {
                    let start = stack.iter().position(|&n| n == dep).unwrap_or(0);
                    let mut cycle: Vec<String> = stack[start..].iter().map(|s| s.to_string()).collect();
                    cycle.push(dep.to_string());
                    return Some(cycle);
                }
                Some(Mark::Done) => continue,
                None => {
                    if let Some(cycle) = visit(dep, by_id, marks, stack) {
                        return Some(cycle);
                    }
                }
            }
        }
    }

    stack.pop();
    marks.insert(id, Mark::Done);
    None
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
