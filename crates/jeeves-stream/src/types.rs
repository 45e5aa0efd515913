// SPDX-License-Identifier: MIT

use jeeves_core::IssueRef;
use jeeves_worktree::SyncStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Live status of the external agent run, as last reported by the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatus {
    pub current_iteration: u64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

/// A full point-in-time view of an issue's durable state, as persisted by
/// the components it summarizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueState {
    pub issue_ref: IssueRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<RunStatus>,
}

/// The resource kinds a status event can report on. `ManagedFiles` covers
/// the whole managed-file-tree reconciler as one slot, matching the bag
/// semantics of that reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Token,
    Azure,
    Ingest,
    ManagedFiles,
}

/// One resource's reconcile outcome, as surfaced to stream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub issue_ref: IssueRef,
    pub worktree_present: bool,
    pub sync_status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

/// One event emitted by the external agent SDK, opaque beyond its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkEvent {
    pub event: String,
    pub data: Value,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
