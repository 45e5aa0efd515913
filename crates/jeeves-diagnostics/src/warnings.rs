// SPDX-License-Identifier: MIT

use crate::counters::IterationCounters;

/// Grep calls strictly above this threshold, with zero reads, trip the
/// many-grep-without-read warning.
const MANY_GREP_WITHOUT_READ_THRESHOLD: u32 = 5;
const DUPLICATE_QUERY_RATE_THRESHOLD: f64 = 0.15;
const LOCATOR_TO_READ_RATIO_THRESHOLD: f64 = 3.0;

/// Produce the fixed-message warnings that apply to `counters`, in a fixed
/// order so callers get a stable list for a given input.
pub fn generate_warnings(counters: &IterationCounters) -> Vec<String> {
    let mut warnings = Vec::new();

    if counters.read_calls == 0 && counters.grep_calls > MANY_GREP_WITHOUT_READ_THRESHOLD {
        warnings.push(
            "Many grep calls were made without a single read follow-up. Read the files located by grep."
                .to_string(),
        );
    }

    if let Some(rate) = counters.duplicate_query_rate {
        if rate > DUPLICATE_QUERY_RATE_THRESHOLD {
            warnings.push(format!(
                "High duplicate grep query rate ({:.1}%). Refine search terms to avoid repeated scans.",
                rate * 100.0
            ));
        }
    }

    if let Some(ratio) = counters.locator_to_read_ratio {
        if ratio > LOCATOR_TO_READ_RATIO_THRESHOLD {
            warnings.push(format!(
                "High locator-to-read ratio ({ratio:.1}). Read the files located by grep instead of searching further."
            ));
        }
    }

    if counters.truncated_tool_result_count > 0 && counters.retrieval_handle_generated_count == 0 {
        warnings.push(
            "Tool output was truncated but no retrieval handle was generated. Request a retrieval handle to access the full output."
                .to_string(),
        );
    }

    if counters.unresolved_count > 0 {
        warnings.push(
            "Unresolved retrieval handles detected. Resolve pending handles before relying on their data."
                .to_string(),
        );
    }

    if counters.truncated_tool_result_count > 0 && counters.raw_output_referenced_after_summary_count == 0 {
        warnings.push(
            "Tool output was truncated but the raw output was never read. Read the raw output before summarizing."
                .to_string(),
        );
    }

    if counters.duplicate_stale_context_count > 0 {
        warnings.push(
            "Raw artifact output was read more than once. Cache the result instead of re-reading the same artifact."
                .to_string(),
        );
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "iteration diagnostics warnings generated");
    }

    warnings
}

#[cfg(test)]
#[path = "warnings_tests.rs"]
mod tests;
