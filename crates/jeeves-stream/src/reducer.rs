// SPDX-License-Identifier: MIT

use crate::event::StreamEvent;
use crate::state::StreamState;
use crate::types::{ResourceKind, SdkEvent};

/// Fold one event into `state`, returning the updated state. Pure: the
/// result depends only on `state` and `event`, so replaying the same event
/// sequence from two empty states yields identical final states.
pub fn reduce(mut state: StreamState, event: StreamEvent) -> StreamState {
    match event {
        StreamEvent::Snapshot { snapshot } => {
            state.snapshot = Some(snapshot);
            state.run_override = None;
        }
        StreamEvent::Run { run } => {
            if let Some(snapshot) = state.snapshot.as_mut() {
                snapshot.run = Some(run.clone());
            }
            state.run_override = Some(run);
        }
        StreamEvent::Logs { lines, reset } => {
            if reset {
                state.logs.reset();
            }
            for line in lines {
                state.logs.push(line);
            }
        }
        StreamEvent::ViewerLogs { lines, reset } => {
            if reset {
                state.viewer_logs.reset();
            }
            for line in lines {
                state.viewer_logs.push(line);
            }
        }
        StreamEvent::Sdk { event, data } => {
            state.sdk_events.push(SdkEvent { event, data });
        }
        StreamEvent::Status { kind, payload } => match kind {
            ResourceKind::Token => state.statuses.token = Some(payload),
            ResourceKind::Azure => state.statuses.azure = Some(payload),
            ResourceKind::Ingest => state.statuses.ingest = Some(payload),
            ResourceKind::ManagedFiles => state.statuses.managed_files = Some(payload),
        },
    }
    state
}

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod tests;
