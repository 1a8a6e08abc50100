//! Centralized callback-data constants for inline keyboard components.
//! Consolidating here keeps the button builders and the callback router in
//! sync when a prefix changes.

use crate::constants::{PRODUCT_CODE_MAX, PRODUCT_CODE_MIN};

/// Withdraw button, followed by the product code.
pub const WITHDRAW_PREFIX: &str = "withdraw_";

pub fn withdraw_id(code: i32) -> String {
    format!("{WITHDRAW_PREFIX}{code}")
}

/// Parse a withdraw callback id back into a product code. Rejects anything
/// outside the allocatable code range so stale or hand-crafted callback data
/// never reaches the database layer.
pub fn parse_withdraw_id(id: &str) -> Option<i32> {
    let code = id.strip_prefix(WITHDRAW_PREFIX)?.parse::<i32>().ok()?;
    if (PRODUCT_CODE_MIN..=PRODUCT_CODE_MAX).contains(&code) {
        Some(code)
    } else {
        None
    }
}
