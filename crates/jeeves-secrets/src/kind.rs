// SPDX-License-Identifier: MIT

//! The two concrete secret shapes and the trait that lets [`crate::store`]
//! write one generic implementation monomorphized per shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SCHEMA_VERSION: u32 = 1;

/// A secret shape: its on-disk record, the fields a caller supplies to
/// [`write`](crate::store::SecretStore::write), and strict read-side
/// validation.
pub trait SecretKind {
    /// On-disk record, round-tripped through [`jeeves_core::encode_canonical`].
    type Record: Clone + Serialize + DeserializeOwned;
    /// Fields a caller supplies on write; `updated_at` is stamped separately.
    type Fields;

    /// File stem under `<issueDir>/.secrets/`, e.g. `"token"`.
    const NAME: &'static str;

    /// Build the canonical record from caller-supplied fields and a
    /// caller-stamped `updated_at`. Assumed already valid — callers
    /// construct `Fields` from validated inputs.
    fn build(fields: Self::Fields, updated_at: String) -> Self::Record;

    /// Strict read-side validation straight from a parsed JSON value.
    /// Returns `None` for anything that should read as "does not exist":
    /// wrong schema version, missing/empty required field, malformed
    /// organization URL, control characters, unparseable `updated_at`.
    fn validate(value: &Value) -> Option<Self::Record>;

    /// Every substring of the record that must never appear in a surfaced
    /// error message.
    fn secret_values(record: &Self::Record) -> Vec<String>;
}

fn schema_version_is(value: &Value) -> bool {
    value.get("schemaVersion").and_then(Value::as_u64) == Some(u64::from(SCHEMA_VERSION))
}

fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    let s = value.get(field)?.as_str()?;
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn has_control_char(s: &str) -> bool {
    s.chars().any(|c| c.is_control())
}

fn parses_as_iso8601(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
}

fn parses_as_url_with_host(s: &str) -> bool {
    match url::Url::parse(s) {
        Ok(url) => url.host().is_some(),
        Err(_) => false,
    }
}

/// A bearer-token secret: `{schemaVersion, token, updated_at}`.
pub struct TokenSecret;

/// Fields supplied on write for [`TokenSecret`].
pub struct TokenFields {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,
    pub token: String,
    pub updated_at: String,
}

impl SecretKind for TokenSecret {
    type Record = TokenRecord;
    type Fields = TokenFields;

    const NAME: &'static str = "token";

    fn build(fields: Self::Fields, updated_at: String) -> Self::Record {
        TokenRecord { schema_version: SCHEMA_VERSION, token: fields.token, updated_at }
    }

    fn validate(value: &Value) -> Option<Self::Record> {
        if !schema_version_is(value) {
            return None;
        }
        let token = non_empty_str(value, "token")?;
        let updated_at = non_empty_str(value, "updated_at")?;
        if !parses_as_iso8601(updated_at) {
            return None;
        }
        Some(TokenRecord {
            schema_version: SCHEMA_VERSION,
            token: token.to_string(),
            updated_at: updated_at.to_string(),
        })
    }

    fn secret_values(record: &Self::Record) -> Vec<String> {
        vec![record.token.clone()]
    }
}

/// An Azure DevOps organization/project/PAT triple.
pub struct AzureSecret;

/// Fields supplied on write for [`AzureSecret`].
pub struct AzureFields {
    pub organization: String,
    pub project: String,
    pub pat: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureRecord {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,
    pub organization: String,
    pub project: String,
    pub pat: String,
    pub updated_at: String,
}

impl SecretKind for AzureSecret {
    type Record = AzureRecord;
    type Fields = AzureFields;

    const NAME: &'static str = "azure";

    fn build(fields: Self::Fields, updated_at: String) -> Self::Record {
        AzureRecord {
            schema_version: SCHEMA_VERSION,
            organization: fields.organization,
            project: fields.project,
            pat: fields.pat,
            updated_at,
        }
    }

    fn validate(value: &Value) -> Option<Self::Record> {
        if !schema_version_is(value) {
            return None;
        }
        let organization = non_empty_str(value, "organization")?;
        if has_control_char(organization) || !parses_as_url_with_host(organization) {
            return None;
        }
        let project = non_empty_str(value, "project")?;
        if has_control_char(project) {
            return None;
        }
        let pat = non_empty_str(value, "pat")?;
        let updated_at = non_empty_str(value, "updated_at")?;
        if !parses_as_iso8601(updated_at) {
            return None;
        }
        Some(AzureRecord {
            schema_version: SCHEMA_VERSION,
            organization: organization.to_string(),
            project: project.to_string(),
            pat: pat.to_string(),
            updated_at: updated_at.to_string(),
        })
    }

    fn secret_values(record: &Self::Record) -> Vec<String> {
        vec![record.pat.clone()]
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
