// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification of a single tool call's name. Computed once via
/// [`classify`] rather than dispatched on repeatedly by string pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Grep,
    Read,
    Other,
}

/// A name is `grep`/`read` iff it normalizes to exactly that after the last
/// `/`, `:`, or `.` separator — so `fs/grep`, `mcp:grep`, and `tool.grep`
/// all classify the same as bare `grep`.
pub fn classify(name: &str) -> ToolKind {
    let normalized = name.rsplit(['/', ':', '.']).next().unwrap_or(name);
    match normalized {
        "grep" => ToolKind::Grep,
        "read" => ToolKind::Read,
        _ => ToolKind::Other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStatus {
    Generated,
    Resolved,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRetrieval {
    pub status: RetrievalStatus,
    pub handle: String,
    #[serde(default)]
    pub artifact_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub response_truncated: bool,
    #[serde(default)]
    pub response_retrieval: Option<ResponseRetrieval>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IterationTrace {
    pub tool_calls: Vec<ToolCall>,
}

const DEFAULT_MAX_MATCHES: i64 = 200;

/// Stable dedup key for a grep call: `{pattern, patterns, path, context_lines, max_matches}`
/// with integer fields truncated, encoded as the canonical JSON this
/// workspace already uses for on-disk documents.
pub fn grep_dedup_key(input: &Value) -> String {
    let context_lines = input.get("context_lines").and_then(Value::as_f64).unwrap_or(0.0).trunc() as i64;
    let max_matches =
        input.get("max_matches").and_then(Value::as_f64).unwrap_or(DEFAULT_MAX_MATCHES as f64).trunc() as i64;
    let key = serde_json::json!({
        "pattern": input.get("pattern").cloned().unwrap_or(Value::Null),
        "patterns": input.get("patterns").cloned().unwrap_or(Value::Null),
        "path": input.get("path").cloned().unwrap_or(Value::Null),
        "context_lines": context_lines,
        "max_matches": max_matches,
    });
    #[allow(clippy::expect_used)]
    let bytes = jeeves_core::encode_canonical(&key).expect("a json::Value always encodes");
    #[allow(clippy::expect_used)]
    String::from_utf8(bytes).expect("canonical json is valid utf8")
}

/// Lowercase, strip a leading `./`, and flip backslashes to forward slashes.
pub fn normalize_artifact_path(path: &str) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.to_lowercase().replace('\\', "/")
}

#[cfg(test)]
#[path = "tool_call_tests.rs"]
mod tests;
