// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::tool_call::{classify, grep_dedup_key, normalize_artifact_path, IterationTrace, RetrievalStatus, ToolKind};

/// Per-iteration tool-usage counters. `locator_to_read_ratio` and
/// `duplicate_query_rate` are `None` when their denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IterationCounters {
    pub grep_calls: u32,
    pub read_calls: u32,
    pub duplicate_grep_calls: u32,
    pub duplicate_query_rate: Option<f64>,
    pub locator_to_read_ratio: Option<f64>,
    pub truncated_tool_result_count: u32,
    pub retrieval_handle_generated_count: u32,
    pub resolved_count: u32,
    pub unresolved_count: u32,
    pub raw_output_referenced_after_summary_count: u32,
    pub duplicate_stale_context_count: u32,
}

/// Walk every tool call once, classifying and tallying as it goes.
pub fn analyze_iteration(trace: &IterationTrace) -> IterationCounters {
    let mut counters = IterationCounters::default();
    let mut seen_grep_keys: HashMap<String, u32> = HashMap::new();
    let mut resolved_artifact_paths: HashMap<String, u32> = HashMap::new();

    for call in &trace.tool_calls {
        match classify(&call.name) {
            ToolKind::Grep => {
                counters.grep_calls += 1;
                let key = grep_dedup_key(&call.input);
                let count = seen_grep_keys.entry(key).or_insert(0);
                *count += 1;
                if *count > 1 {
                    counters.duplicate_grep_calls += 1;
                }
            }
            ToolKind::Read => counters.read_calls += 1,
            ToolKind::Other => {}
        }

        if call.response_truncated {
            counters.truncated_tool_result_count += 1;
        }

        if let Some(retrieval) = &call.response_retrieval {
            match retrieval.status {
                RetrievalStatus::Generated => counters.retrieval_handle_generated_count += 1,
                RetrievalStatus::Resolved => {
                    counters.resolved_count += 1;
                    counters.raw_output_referenced_after_summary_count += 1;
                    for path in &retrieval.artifact_paths {
                        let normalized = normalize_artifact_path(path);
                        let count = resolved_artifact_paths.entry(normalized).or_insert(0);
                        *count += 1;
                        if *count > 1 {
                            counters.duplicate_stale_context_count += 1;
                        }
                    }
                }
                RetrievalStatus::Unresolved => counters.unresolved_count += 1,
            }
        }
    }

    counters.duplicate_query_rate = if counters.grep_calls == 0 {
        None
    } else {
        Some(f64::from(counters.duplicate_grep_calls) / f64::from(counters.grep_calls))
    };

    counters.locator_to_read_ratio = if counters.read_calls == 0 {
        None
    } else {
        Some(f64::from(counters.grep_calls) / f64::from(counters.read_calls))
    };

    counters
}

#[cfg(test)]
#[path = "counters_tests.rs"]
mod tests;
