//! Claimed-code parsing for the shelf audit flow.

use pantry_bot::commands::inventory::parse_claimed_codes;

#[test]
fn one_code_per_line_with_noise_tolerated() {
    let claimed = parse_claimed_codes("10000001\n 10000002 \n\nnot a code\n10000003");
    assert_eq!(claimed.len(), 3);
    assert!(claimed.contains(&10_000_001));
    assert!(claimed.contains(&10_000_002));
    assert!(claimed.contains(&10_000_003));
}

#[test]
fn duplicates_collapse_and_empty_input_claims_nothing() {
    assert_eq!(parse_claimed_codes("10000001\n10000001").len(), 1);
    assert!(parse_claimed_codes("").is_empty());
}
