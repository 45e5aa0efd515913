// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jeeves-diagnostics: per-iteration tool-usage analysis of an external
//! agent's trace, plus the trajectory reducer that maintains the bounded
//! `active_context.json`/`retired_trajectory.json` artifacts.

mod counters;
mod errors;
mod tool_call;
mod trajectory;
mod warnings;

pub use counters::{analyze_iteration, IterationCounters};
pub use errors::DiagnosticsError;
pub use tool_call::{
    classify, grep_dedup_key, normalize_artifact_path, IterationTrace, ResponseRetrieval, RetrievalStatus, ToolCall,
    ToolKind,
};
pub use trajectory::{build_active_context, retire_missing, ActiveContext, MemoryEntry, MemoryKind, TrajectoryStore};
pub use warnings::generate_warnings;
