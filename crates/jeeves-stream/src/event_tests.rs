// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn logs_event_tag_is_the_wire_discriminant() {
    let event = StreamEvent::Logs { lines: vec!["a".to_string()], reset: true };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "logs");
    assert_eq!(value["reset"], true);
}

#[test]
fn logs_reset_defaults_to_false_when_absent_on_decode() {
    let event: StreamEvent = serde_json::from_str(r#"{"type":"logs","lines":["a"]}"#).unwrap();
    match event {
        StreamEvent::Logs { reset, .. } => assert!(!reset),
        other => panic!("unexpected variant: {other:?}"),
    }
}
