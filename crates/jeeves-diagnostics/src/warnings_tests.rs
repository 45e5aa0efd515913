// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn duplicate_query_rate_warning_matches_the_documented_exact_string() {
    let counters = IterationCounters {
        grep_calls: 20,
        duplicate_grep_calls: 4,
        duplicate_query_rate: Some(0.2),
        read_calls: 5,
        ..Default::default()
    };
    let warnings = generate_warnings(&counters);
    assert!(warnings
        .contains(&"High duplicate grep query rate (20.0%). Refine search terms to avoid repeated scans.".to_string()));
}

#[test]
fn many_grep_without_read_fires_at_six_grep_calls_and_zero_reads() {
    let counters = IterationCounters { grep_calls: 6, read_calls: 0, ..Default::default() };
    let warnings = generate_warnings(&counters);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Many grep calls"));
}

#[test]
fn many_grep_without_read_does_not_fire_at_the_threshold_itself() {
    let counters = IterationCounters { grep_calls: 5, read_calls: 0, ..Default::default() };
    assert!(generate_warnings(&counters).is_empty());
}

#[test]
fn duplicate_query_rate_at_exactly_the_threshold_does_not_fire() {
    let counters = IterationCounters {
        grep_calls: 20,
        duplicate_grep_calls: 3,
        duplicate_query_rate: Some(0.15),
        read_calls: 5,
        ..Default::default()
    };
    assert!(generate_warnings(&counters).is_empty());
}

#[test]
fn locator_to_read_ratio_warning_fires_strictly_above_three() {
    let counters = IterationCounters { grep_calls: 13, read_calls: 4, locator_to_read_ratio: Some(3.25), ..Default::default() };
    let warnings = generate_warnings(&counters);
    assert!(warnings.iter().any(|w| w.contains("locator-to-read ratio")));
}

#[test]
fn truncation_without_handle_warns() {
    let counters = IterationCounters { truncated_tool_result_count: 1, retrieval_handle_generated_count: 0, ..Default::default() };
    let warnings = generate_warnings(&counters);
    assert!(warnings.iter().any(|w| w.contains("no retrieval handle was generated")));
}

#[test]
fn unresolved_handles_warn() {
    let counters = IterationCounters { unresolved_count: 1, ..Default::default() };
    let warnings = generate_warnings(&counters);
    assert!(warnings.iter().any(|w| w.contains("Unresolved retrieval handles")));
}

#[test]
fn truncation_without_raw_read_warns() {
    let counters = IterationCounters {
        truncated_tool_result_count: 1,
        raw_output_referenced_after_summary_count: 0,
        ..Default::default()
    };
    let warnings = generate_warnings(&counters);
    assert!(warnings.iter().any(|w| w.contains("raw output was never read")));
}

#[test]
fn repeated_artifact_reads_warn() {
    let counters = IterationCounters { duplicate_stale_context_count: 1, ..Default::default() };
    let warnings = generate_warnings(&counters);
    assert!(warnings.iter().any(|w| w.contains("read more than once")));
}

#[test]
fn a_clean_iteration_produces_no_warnings() {
    let counters =
        IterationCounters { grep_calls: 2, read_calls: 2, duplicate_query_rate: Some(0.0), locator_to_read_ratio: Some(1.0), ..Default::default() };
    assert!(generate_warnings(&counters).is_empty());
}
