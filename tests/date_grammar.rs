//! Covers the expiry date expression grammar: pattern priority, defaults,
//! the shelf-life modifier and the past-date soft rejection.

use chrono::{NaiveDate, TimeZone, Utc};
use pantry_bot::commands::new_product::dates::{parse_base_date, parse_expiry, DateError};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

#[test]
fn bare_day_fills_current_month_and_year() {
    assert_eq!(
        parse_base_date("12", today()),
        NaiveDate::from_ymd_opt(2024, 6, 12)
    );
}

#[test]
fn day_and_month_fill_current_year() {
    assert_eq!(
        parse_base_date("12.06", today()),
        NaiveDate::from_ymd_opt(2024, 6, 12)
    );
}

#[test]
fn two_and_four_digit_years_agree() {
    let expected = NaiveDate::from_ymd_opt(2024, 6, 12);
    assert_eq!(parse_base_date("12.06.24", today()), expected);
    assert_eq!(parse_base_date("12.06.2024", today()), expected);
}

#[test]
fn two_digit_years_pivot_at_68() {
    assert_eq!(
        parse_base_date("01.01.68", today()),
        NaiveDate::from_ymd_opt(2068, 1, 1)
    );
    assert_eq!(
        parse_base_date("01.01.69", today()),
        NaiveDate::from_ymd_opt(1969, 1, 1)
    );
}

#[test]
fn impossible_calendar_dates_fail() {
    assert_eq!(parse_base_date("31.02", today()), None);
    assert_eq!(parse_base_date("0.06", today()), None);
    assert_eq!(parse_base_date("12.13", today()), None);
}

#[test]
fn garbage_is_an_invalid_date() {
    assert_eq!(parse_expiry("abc", now()), Err(DateError::InvalidDate));
    assert_eq!(parse_expiry("", now()), Err(DateError::InvalidDate));
    assert_eq!(parse_expiry("12,06", now()), Err(DateError::InvalidDate));
}

#[test]
fn day_modifier_adds_days() {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(
        parse_expiry("12.06 + 10 сут", start),
        Ok(Utc.with_ymd_and_hms(2024, 6, 22, 0, 0, 0).unwrap())
    );
}

#[test]
fn month_and_year_modifiers_use_fixed_coefficients() {
    assert_eq!(
        parse_expiry("01.01.30 + 2 мес", now()),
        Ok(Utc.with_ymd_and_hms(2030, 3, 2, 0, 0, 0).unwrap())
    );
    assert_eq!(
        parse_expiry("01.01.25 + 1 лет", now()),
        Ok(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn malformed_modifiers_are_rejected() {
    assert_eq!(
        parse_expiry("12.06 + x сут", now()),
        Err(DateError::InvalidModifier)
    );
    assert_eq!(
        parse_expiry("12.06 + -1 сут", now()),
        Err(DateError::InvalidModifier)
    );
    assert_eq!(
        parse_expiry("12.06 + 10 недель", now()),
        Err(DateError::InvalidModifier)
    );
    assert_eq!(
        parse_expiry("12.06 + 10", now()),
        Err(DateError::InvalidModifier)
    );
    assert_eq!(
        parse_expiry("12 + 1 сут + 2", now()),
        Err(DateError::InvalidModifier)
    );
}

#[test]
fn past_dates_get_the_soft_warning() {
    // Day 12 parses fine but midnight of it lies before the current instant.
    assert_eq!(parse_expiry("12", now()), Err(DateError::InPast));
    assert_eq!(parse_expiry("01.01.20", now()), Err(DateError::InPast));
}

#[test]
fn modifier_can_lift_a_past_base_date_into_the_future() {
    assert_eq!(
        parse_expiry("12.06 + 1 мес", now()),
        Ok(Utc.with_ymd_and_hms(2024, 7, 12, 0, 0, 0).unwrap())
    );
}
