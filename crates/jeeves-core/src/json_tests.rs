// SPDX-License-Identifier: MIT

use super::*;
use serde::Serialize;

#[derive(Serialize)]
struct Unsorted {
    zeta: u32,
    alpha: u32,
    middle: u32,
}

#[test]
fn encode_canonical_sorts_keys_regardless_of_field_order() {
    let value = Unsorted { zeta: 1, alpha: 2, middle: 3 };
    let bytes = encode_canonical(&value).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, "{\"alpha\":2,\"middle\":3,\"zeta\":1}\n");
}

#[test]
fn encode_canonical_appends_exactly_one_trailing_newline() {
    let bytes = encode_canonical(&42u32).unwrap();
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.ends_with(b"\n\n"));
}
