// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::ring::RingBuffer;
use crate::types::{IssueState, RunStatus, SdkEvent, StatusEvent};

/// Ring buffer capacity for the `logs` and `viewerLogs` slots.
pub const N_LOGS: usize = 2000;
/// Ring buffer capacity for the `sdkEvents` slot.
pub const N_SDK_EVENTS: usize = 1000;

/// Per-resource reconcile status, one independent slot per kind — an event
/// for one kind must never clobber another.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceStatuses {
    pub token: Option<StatusEvent>,
    pub azure: Option<StatusEvent>,
    pub ingest: Option<StatusEvent>,
    pub managed_files: Option<StatusEvent>,
}

/// The derived view a transport layer hands to consumers. Built by folding
/// [`crate::StreamEvent`]s through [`crate::reduce`]; `connected` is set
/// directly by the transport, not by an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamState {
    pub connected: bool,
    pub snapshot: Option<IssueState>,
    pub run_override: Option<RunStatus>,
    pub statuses: ResourceStatuses,
    pub logs: RingBuffer<String>,
    pub viewer_logs: RingBuffer<String>,
    pub sdk_events: RingBuffer<SdkEvent>,
}

impl StreamState {
    pub fn new() -> Self {
        StreamState {
            connected: false,
            snapshot: None,
            run_override: None,
            statuses: ResourceStatuses::default(),
            logs: RingBuffer::new(N_LOGS),
            viewer_logs: RingBuffer::new(N_LOGS),
            sdk_events: RingBuffer::new(N_SDK_EVENTS),
        }
    }

    /// `runOverride ?? snapshot.run ?? null`, recomputed from the current
    /// state rather than cached, so it can never drift from its inputs.
    pub fn effective_run(&self) -> Option<&RunStatus> {
        self.run_override.as_ref().or_else(|| self.snapshot.as_ref().and_then(|s| s.run.as_ref()))
    }
}

impl Default for StreamState {
    fn default() -> Self {
        StreamState::new()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
