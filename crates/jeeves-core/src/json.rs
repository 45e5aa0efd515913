// SPDX-License-Identifier: MIT

//! Canonical JSON encoding shared by every managed document (locks,
//! journals, secrets, task graphs, diagnostics artifacts): UTF-8, no BOM,
//! object keys sorted lexicographically, trailing newline.
//!
//! Key sorting falls out of `serde_json::Value`'s default `Map`, which is
//! `BTreeMap`-backed as long as the `preserve_order` feature is not enabled
//! (it is not, anywhere in this workspace) — round-tripping a struct through
//! `Value` before encoding is what actually guarantees sorted keys, since a
//! struct's `Serialize` impl alone would emit fields in declaration order.

use serde::Serialize;
use serde_json::Value;

/// Encode `value` as canonical JSON bytes: sorted keys, trailing `\n`.
pub fn encode_canonical<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let as_value: Value = serde_json::to_value(value)?;
    let mut bytes = serde_json::to_vec(&as_value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
