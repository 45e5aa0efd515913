// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jeeves-stream: the single-writer pure reducer that folds a stream of
//! tagged events into the derived view consumers read. The reducer never
//! suspends — it is invoked one event at a time by the transport layer,
//! which alone owns `connected`.

mod event;
mod reducer;
mod ring;
mod state;
mod types;

pub use event::StreamEvent;
pub use reducer::reduce;
pub use ring::RingBuffer;
pub use state::{ResourceStatuses, StreamState, N_LOGS, N_SDK_EVENTS};
pub use types::{IssueState, ResourceKind, RunStatus, SdkEvent, StatusEvent};
