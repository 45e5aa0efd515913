// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jeeves-core: shared primitives for the per-issue operation coordinator.
//!
//! Hosts the pieces every other `jeeves-*` crate depends on: a testable
//! [`Clock`], validated identifier newtypes ([`IssueRef`], [`OperationId`]),
//! the atomic file writer ([`fsatomic`]), the process-liveness probe
//! ([`liveness`]), and process-observed configuration ([`env`]).

pub mod clock;
pub mod env;
pub mod fsatomic;
pub mod ids;
pub mod json;
pub mod liveness;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use fsatomic::{reap_temps, write_atomic, FsAtomicError};
pub use ids::{IssueRef, IssueRefError, OperationId, OperationIdError};
pub use json::encode_canonical;
pub use liveness::is_alive;
