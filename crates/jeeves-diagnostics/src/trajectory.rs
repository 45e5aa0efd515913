// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jeeves_core::{encode_canonical, write_atomic, Clock};

use crate::errors::DiagnosticsError;

const ACTIVE_CONTEXT_FILE: &str = "active_context.json";
const RETIRED_TRAJECTORY_FILE: &str = "retired_trajectory.json";
const MANAGED_FILE_MODE: u32 = 0o644;

/// One kind of persisted structured-memory entry. `EvidenceLink` entries
/// feed `required_evidence_links` rather than a prose field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    Objective,
    Hypothesis,
    Blocker,
    NextAction,
    UnresolvedQuestion,
    EvidenceLink,
}

/// A single structured-memory entry as persisted by the external agent
/// between iterations. `id` is the identity used to detect retirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: String,
    pub kind: MemoryKind,
    pub content: String,
}

/// The six-field bounded artifact derived from the current iteration's
/// memory entries and task list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_objective: Option<String>,
    #[serde(default)]
    pub open_hypotheses: Vec<String>,
    #[serde(default)]
    pub blockers: Vec<String>,
    #[serde(default)]
    pub next_actions: Vec<String>,
    #[serde(default)]
    pub unresolved_questions: Vec<String>,
    #[serde(default)]
    pub required_evidence_links: Vec<String>,
}

/// Group `entries` into the six fields. The latest `Objective` entry (last
/// in iteration order) wins; every other kind accumulates in order.
pub fn build_active_context(entries: &[MemoryEntry]) -> ActiveContext {
    let mut context = ActiveContext::default();
    for entry in entries {
        match entry.kind {
            MemoryKind::Objective => context.current_objective = Some(entry.content.clone()),
            MemoryKind::Hypothesis => context.open_hypotheses.push(entry.content.clone()),
            MemoryKind::Blocker => context.blockers.push(entry.content.clone()),
            MemoryKind::NextAction => context.next_actions.push(entry.content.clone()),
            MemoryKind::UnresolvedQuestion => context.unresolved_questions.push(entry.content.clone()),
            MemoryKind::EvidenceLink => context.required_evidence_links.push(entry.content.clone()),
        }
    }
    context
}

/// Entries present in `previous` but absent (by id) from `current`.
pub fn retire_missing(previous: &[MemoryEntry], current: &[MemoryEntry]) -> Vec<MemoryEntry> {
    let current_ids: std::collections::HashSet<&str> = current.iter().map(|e| e.id.as_str()).collect();
    previous.iter().filter(|e| !current_ids.contains(e.id.as_str())).cloned().collect()
}

/// Maintains `active_context.json` and `retired_trajectory.json` under an
/// issue directory, both written via the atomic writer.
pub struct TrajectoryStore {
    issue_dir: PathBuf,
}

impl TrajectoryStore {
    pub fn new(issue_dir: impl Into<PathBuf>) -> Self {
        TrajectoryStore { issue_dir: issue_dir.into() }
    }

    fn active_context_path(&self) -> PathBuf {
        self.issue_dir.join(ACTIVE_CONTEXT_FILE)
    }

    fn retired_path(&self) -> PathBuf {
        self.issue_dir.join(RETIRED_TRAJECTORY_FILE)
    }

    pub fn persist_active_context(
        &self,
        entries: &[MemoryEntry],
        clock: &impl Clock,
    ) -> Result<ActiveContext, DiagnosticsError> {
        let context = build_active_context(entries);
        let path = self.active_context_path();
        let bytes =
            encode_canonical(&context).map_err(|source| DiagnosticsError::Encode { path: path.clone(), source })?;
        write_atomic(&path, &bytes, MANAGED_FILE_MODE, clock)
            .map_err(|source| DiagnosticsError::Write { path, source })?;
        Ok(context)
    }

    fn read_retired(&self, path: &Path) -> Result<Vec<MemoryEntry>, DiagnosticsError> {
        match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|source| DiagnosticsError::Decode { path: path.to_path_buf(), source }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(DiagnosticsError::Read { path: path.to_path_buf(), source }),
        }
    }

    /// Compute entries retired between `previous` and `current` and append
    /// them to the persisted retired list. Returns the newly retired
    /// entries (empty if nothing retired this iteration — no write occurs).
    pub fn retire_and_persist(
        &self,
        previous: &[MemoryEntry],
        current: &[MemoryEntry],
        clock: &impl Clock,
    ) -> Result<Vec<MemoryEntry>, DiagnosticsError> {
        let retired = retire_missing(previous, current);
        if retired.is_empty() {
            return Ok(retired);
        }

        let path = self.retired_path();
        let mut all_retired = self.read_retired(&path)?;
        all_retired.extend(retired.iter().cloned());

        let bytes = encode_canonical(&all_retired)
            .map_err(|source| DiagnosticsError::Encode { path: path.clone(), source })?;
        write_atomic(&path, &bytes, MANAGED_FILE_MODE, clock)
            .map_err(|source| DiagnosticsError::Write { path, source })?;
        Ok(retired)
    }
}

#[cfg(test)]
#[path = "trajectory_tests.rs"]
mod tests;
