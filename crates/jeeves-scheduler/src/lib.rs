// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jeeves-scheduler: DAG task-graph validation and deterministic selection.
//!
//! [`graph`] owns the in-memory shape and the three validation passes
//! (duplicate ids, missing dependencies, cycles). [`schedule`] computes
//! readiness and the total selection ordering. [`store`] persists the graph
//! at `<issueDir>/tasks.json` over the same atomic writer every other
//! component uses.

mod graph;
mod schedule;
mod store;

#[cfg(test)]
mod property_tests;

pub use graph::{validate_task_graph, GraphValidationError, Task, TaskGraph, TaskStatus};
pub use schedule::{is_ready, schedule};
pub use store::{SchedulerError, TaskGraphStore};
