// SPDX-License-Identifier: MIT

use std::fs;
use std::io;
use std::path::PathBuf;

use jeeves_core::{encode_canonical, write_atomic, Clock};

use crate::graph::{validate_task_graph, GraphValidationError, Task, TaskGraph, TaskStatus};

/// Errors surfaced by [`TaskGraphStore`]: graph validation, I/O, or decode
/// failures on a file that should hold a `TaskGraph`.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Validation(#[from] GraphValidationError),

    #[error("failed to read {path}: {source}", path = path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {path} as a task graph: {source}", path = path.display())]
    Decode { path: PathBuf, source: serde_json::Error },

    #[error("failed to write {path}: {source}", path = path.display())]
    Write { path: PathBuf, source: jeeves_core::FsAtomicError },

    #[error("no task graph found at {path}", path = path.display())]
    NotFound { path: PathBuf },

    #[error("task {task_id:?} not found")]
    TaskNotFound { task_id: String },
}

/// JSON-file-backed home for the task graph, at `<issueDir>/tasks.json`.
pub struct TaskGraphStore {
    path: PathBuf,
}

impl TaskGraphStore {
    pub fn new(issue_dir: impl Into<PathBuf>) -> Self {
        TaskGraphStore { path: issue_dir.into().join("tasks.json") }
    }

    /// Replace the whole graph. Validates first; no partial graph is ever
    /// persisted.
    pub fn put_tasks(&self, tasks: Vec<Task>, clock: &impl Clock) -> Result<TaskGraph, SchedulerError> {
        validate_task_graph(&tasks)?;
        let graph = TaskGraph { tasks };
        self.persist(&graph, clock)?;
        Ok(graph)
    }

    /// Mutate one task's status in place, re-validating only that the id
    /// exists. Status transitions are otherwise unrestricted.
    pub fn set_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Result<TaskGraph, SchedulerError> {
        let mut graph = self.read()?.ok_or_else(|| SchedulerError::NotFound { path: self.path.clone() })?;
        let task = graph
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| SchedulerError::TaskNotFound { task_id: task_id.to_string() })?;
        task.status = status;
        self.persist(&graph, clock)?;
        Ok(graph)
    }

    /// `None` when no graph has been persisted yet.
    pub fn read(&self) -> Result<Option<TaskGraph>, SchedulerError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SchedulerError::Read { path: self.path.clone(), source }),
        };
        let graph = serde_json::from_slice(&bytes)
            .map_err(|source| SchedulerError::Decode { path: self.path.clone(), source })?;
        Ok(Some(graph))
    }

    /// Validate + select in one call, reading the persisted graph.
    pub fn schedule(&self, max_parallel: usize) -> Result<Vec<Task>, SchedulerError> {
        let graph = self.read()?.ok_or_else(|| SchedulerError::NotFound { path: self.path.clone() })?;
        Ok(crate::schedule::schedule(&graph.tasks, max_parallel)?)
    }

    fn persist(&self, graph: &TaskGraph, clock: &impl Clock) -> Result<(), SchedulerError> {
        let bytes = encode_canonical(graph)
            .map_err(|source| SchedulerError::Decode { path: self.path.clone(), source })?;
        write_atomic(&self.path, &bytes, 0o644, clock)
            .map_err(|source| SchedulerError::Write { path: self.path.clone(), source })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
