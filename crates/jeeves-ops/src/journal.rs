// SPDX-License-Identifier: MIT

//! The operation journal: `{schemaVersion, operation_id, kind, state,
//! issue_ref, provider, started_at, updated_at, completed_at, checkpoint}`,
//! plus the CRUD operations over it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use jeeves_core::{encode_canonical, reap_temps, write_atomic, Clock, IssueRef, OperationId};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::OpsError;

const SCHEMA_VERSION: u32 = 1;
const MAX_WARNING_LEN: usize = 512;
const MAX_WARNINGS: usize = 50;

static STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^(cred|ingest|pr)\.[a-z_]+$").expect("constant regex pattern is valid")
});

/// A validated journal `state` string, e.g. `cred.validating`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JournalState(String);

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("journal state {0:?} does not match ^(cred|ingest|pr)\\.[a-z_]+$")]
pub struct JournalStateError(String);

impl JournalState {
    pub fn parse(value: impl Into<String>) -> Result<Self, JournalStateError> {
        let value = value.into();
        if STATE_RE.is_match(&value) {
            Ok(JournalState(value))
        } else {
            Err(JournalStateError(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JournalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for JournalState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        JournalState::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// The kind of operation a journal tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalKind {
    Credentials,
    Ingest,
    PrPrepare,
}

/// Opaque provider tokens (γ/α in the spec prose) as a closed enum, so an
/// external adapter can never inject an unrecognized variant into a
/// persisted journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    Claude,
    Codex,
}

/// Mutable progress markers recorded as side effects complete, so recovery
/// can resume from the right step instead of restarting an operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checkpoint {
    pub remote_id: Option<String>,
    pub remote_url: Option<String>,
    pub pr_id: Option<String>,
    #[serde(default)]
    pub issue_state_persisted: bool,
    #[serde(default)]
    pub init_completed: bool,
    #[serde(default)]
    pub auto_selected: bool,
    #[serde(default)]
    pub auto_run_started: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Checkpoint {
    fn normalize(mut self) -> Self {
        for warning in &mut self.warnings {
            if warning.len() > MAX_WARNING_LEN {
                warning.truncate(MAX_WARNING_LEN);
            }
        }
        self.warnings.truncate(MAX_WARNINGS);
        self
    }
}

/// Fields a caller may update via [`update_journal_checkpoint`]. `None`
/// leaves the existing value untouched; `warnings` replaces the list
/// wholesale when present.
#[derive(Debug, Clone, Default)]
pub struct CheckpointPatch {
    pub remote_id: Option<Option<String>>,
    pub remote_url: Option<Option<String>>,
    pub pr_id: Option<Option<String>>,
    pub issue_state_persisted: Option<bool>,
    pub init_completed: Option<bool>,
    pub auto_selected: Option<bool>,
    pub auto_run_started: Option<bool>,
    pub warnings: Option<Vec<String>>,
}

impl Checkpoint {
    fn apply(mut self, patch: CheckpointPatch) -> Self {
        if let Some(v) = patch.remote_id {
            self.remote_id = v;
        }
        if let Some(v) = patch.remote_url {
            self.remote_url = v;
        }
        if let Some(v) = patch.pr_id {
            self.pr_id = v;
        }
        if let Some(v) = patch.issue_state_persisted {
            self.issue_state_persisted = v;
        }
        if let Some(v) = patch.init_completed {
            self.init_completed = v;
        }
        if let Some(v) = patch.auto_selected {
            self.auto_selected = v;
        }
        if let Some(v) = patch.auto_run_started {
            self.auto_run_started = v;
        }
        if let Some(v) = patch.warnings {
            self.warnings = v;
        }
        self.normalize()
    }
}

/// The operation journal as persisted at `.ops/provider-operation.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,
    pub operation_id: OperationId,
    pub kind: JournalKind,
    pub state: JournalState,
    pub issue_ref: IssueRef,
    pub provider: Option<Provider>,
    pub started_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
    pub checkpoint: Checkpoint,
}

pub(crate) fn journal_path(issue_dir: &Path) -> PathBuf {
    issue_dir.join(".ops").join("provider-operation.json")
}

fn persist(path: &Path, journal: &Journal, clock: &impl Clock) -> Result<(), OpsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| OpsError::CreateDir { path: parent.to_path_buf(), source })?;
    }
    let bytes =
        encode_canonical(journal).map_err(|source| OpsError::Encode { path: path.to_path_buf(), source })?;
    write_atomic(path, &bytes, 0o600, clock).map_err(|source| OpsError::Write { path: path.to_path_buf(), source })
}

/// Read the journal, if one is persisted.
pub fn read_journal(issue_dir: &Path) -> Result<Option<Journal>, OpsError> {
    let path = journal_path(issue_dir);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(OpsError::Read { path, source }),
    };
    let journal = serde_json::from_slice(&bytes).map_err(|source| OpsError::Decode { path, source })?;
    Ok(Some(journal))
}

/// Start a new journal at `initial_state`.
pub fn create_journal(
    issue_dir: &Path,
    operation_id: OperationId,
    kind: JournalKind,
    issue_ref: IssueRef,
    provider: Option<Provider>,
    initial_state: JournalState,
    clock: &impl Clock,
) -> Result<Journal, OpsError> {
    let now = clock.iso8601();
    let journal = Journal {
        schema_version: SCHEMA_VERSION,
        operation_id,
        kind,
        state: initial_state,
        issue_ref,
        provider,
        started_at: now.clone(),
        updated_at: now,
        completed_at: None,
        checkpoint: Checkpoint::default(),
    };
    persist(&journal_path(issue_dir), &journal, clock)?;
    Ok(journal)
}

/// Advance the journal's `state`, preserving every other field.
pub fn update_journal_state(issue_dir: &Path, state: JournalState, clock: &impl Clock) -> Result<Journal, OpsError> {
    let path = journal_path(issue_dir);
    let mut journal = read_journal(issue_dir)?.ok_or_else(|| OpsError::NoJournal { path: path.clone() })?;
    journal.state = state;
    journal.updated_at = clock.iso8601();
    persist(&path, &journal, clock)?;
    Ok(journal)
}

/// Merge `patch` into the journal's checkpoint, preserving every other
/// field. Truncates warnings per-item (512 chars) and the list (50 items)
/// on every write.
pub fn update_journal_checkpoint(
    issue_dir: &Path,
    patch: CheckpointPatch,
    clock: &impl Clock,
) -> Result<Journal, OpsError> {
    let path = journal_path(issue_dir);
    let mut journal = read_journal(issue_dir)?.ok_or_else(|| OpsError::NoJournal { path: path.clone() })?;
    journal.checkpoint = journal.checkpoint.apply(patch);
    journal.updated_at = clock.iso8601();
    persist(&path, &journal, clock)?;
    Ok(journal)
}

/// Advance to a terminal state and stamp `completed_at`.
pub fn finalize_journal(issue_dir: &Path, state: JournalState, clock: &impl Clock) -> Result<Journal, OpsError> {
    let path = journal_path(issue_dir);
    let mut journal = read_journal(issue_dir)?.ok_or_else(|| OpsError::NoJournal { path: path.clone() })?;
    journal.state = state;
    journal.updated_at = clock.iso8601();
    journal.completed_at = Some(journal.updated_at.clone());
    persist(&path, &journal, clock)?;
    tracing::info!(
        issue_dir = %issue_dir.display(),
        operation_id = %journal.operation_id,
        state = %journal.state,
        "journal finalized"
    );
    Ok(journal)
}

/// Remove the journal file, reporting whether one existed.
pub fn delete_journal(issue_dir: &Path) -> Result<bool, OpsError> {
    let path = journal_path(issue_dir);
    let existed = path.exists();
    reap_temps(&path).map_err(|source| OpsError::Read { path, source })?;
    Ok(existed)
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
