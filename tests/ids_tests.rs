//! Callback-id construction and parsing for the withdraw button.

use pantry_bot::constants::{PRODUCT_CODE_MAX, PRODUCT_CODE_MIN};
use pantry_bot::interactions::ids::{parse_withdraw_id, withdraw_id};

#[test]
fn withdraw_id_round_trips() {
    for code in [PRODUCT_CODE_MIN, 12_345_678, PRODUCT_CODE_MAX] {
        assert_eq!(parse_withdraw_id(&withdraw_id(code)), Some(code));
    }
}

#[test]
fn rejects_malformed_or_out_of_range_ids() {
    assert_eq!(parse_withdraw_id("withdraw_"), None);
    assert_eq!(parse_withdraw_id("withdraw_abc"), None);
    assert_eq!(parse_withdraw_id("withdraw_999"), None);
    assert_eq!(parse_withdraw_id("withdraw_100000000"), None);
    assert_eq!(parse_withdraw_id("restock_12345678"), None);
    assert_eq!(parse_withdraw_id(""), None);
}
