// SPDX-License-Identifier: MIT

//! Validated identifier newtypes that are part of the on-disk public
//! contract: any consumer writing lock/journal files directly must produce
//! values matching these patterns.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::expect_used)]
static OPERATION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._:-]{8,128}$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static ISSUE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s/]+/[^\s/]+#\d+$").expect("constant regex pattern is valid"));

/// Operation identifier: `^[A-Za-z0-9._:-]{8,128}$`.
///
/// Caller-supplied (e.g. a UUID), not generated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OperationId(String);

/// A value failed to match the `OperationId` pattern.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid operation_id: expected ^[A-Za-z0-9._:-]{{8,128}}$, got {0:?}")]
pub struct OperationIdError(pub String);

impl OperationId {
    pub fn parse(s: impl Into<String>) -> Result<Self, OperationIdError> {
        let s = s.into();
        if OPERATION_ID_RE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(OperationIdError(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for OperationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OperationId::parse(s).map_err(serde::de::Error::custom)
    }
}

/// Issue reference: `^[^\s/]+/[^\s/]+#\d+$` (e.g. `acme/widgets#42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IssueRef(String);

/// A value failed to match the `IssueRef` pattern.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid issue_ref: expected ^[^\\s/]+/[^\\s/]+#\\d+$, got {0:?}")]
pub struct IssueRefError(pub String);

impl IssueRef {
    pub fn parse(s: impl Into<String>) -> Result<Self, IssueRefError> {
        let s = s.into();
        if ISSUE_REF_RE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(IssueRefError(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for IssueRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IssueRef::parse(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
