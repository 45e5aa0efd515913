// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::types::{IssueState, ResourceKind, RunStatus, StatusEvent};

/// A single tagged event folded into a [`crate::StreamState`] by
/// [`crate::reduce`]. Serializes as `{"type": "...", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamEvent {
    #[serde(rename = "snapshot")]
    Snapshot { snapshot: IssueState },

    #[serde(rename = "run")]
    Run { run: RunStatus },

    #[serde(rename = "logs")]
    Logs {
        lines: Vec<String>,
        #[serde(default)]
        reset: bool,
    },

    #[serde(rename = "viewer_logs")]
    ViewerLogs {
        lines: Vec<String>,
        #[serde(default)]
        reset: bool,
    },

    #[serde(rename = "sdk")]
    Sdk { event: String, data: serde_json::Value },

    #[serde(rename = "status")]
    Status { kind: ResourceKind, payload: StatusEvent },
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
