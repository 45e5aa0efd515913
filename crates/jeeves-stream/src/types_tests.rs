// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn issue_state_round_trips_through_json() {
    let state = IssueState {
        issue_ref: IssueRef::parse("acme/widgets#42").unwrap(),
        run: Some(RunStatus { current_iteration: 3, status: "running".to_string(), started_at: None }),
    };
    let bytes = serde_json::to_vec(&state).unwrap();
    let decoded: IssueState = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded, state);
}

#[test]
fn resource_kind_serializes_camel_case() {
    assert_eq!(serde_json::to_value(ResourceKind::ManagedFiles).unwrap(), serde_json::json!("managedFiles"));
}
