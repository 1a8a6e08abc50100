//! The pending-action column codec must survive round trips, keep a stable
//! storage tag, and treat anything undecodable as "no pending action".

use pantry_bot::database::models::{decode_current_action, encode_current_action, CurrentAction};

#[test]
fn null_column_means_no_pending_action() {
    assert_eq!(decode_current_action(None), None);
}

#[test]
fn encoded_action_round_trips_with_its_payload() {
    let action = CurrentAction::RequestDate {
        name: "Milk".to_string(),
    };
    let stored = encode_current_action(Some(&action)).unwrap();
    assert!(stored.contains("request_date"), "unexpected tag in {stored}");
    assert_eq!(decode_current_action(Some(&stored)), Some(action));
}

#[test]
fn no_action_encodes_to_a_null_column() {
    assert_eq!(encode_current_action(None), None);
}

#[test]
fn corrupt_or_unknown_payloads_decode_to_none() {
    assert_eq!(decode_current_action(Some("not json")), None);
    assert_eq!(decode_current_action(Some("{\"action\":\"time_travel\"}")), None);
    assert_eq!(decode_current_action(Some("null")), None);
}
