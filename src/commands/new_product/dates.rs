//! The expiry date expression grammar.
//!
//! A date expression is `<base date>` or `<base date> + <count> <unit>`.
//! The base date must match exactly one of `DD`, `DD.MM`, `DD.MM.YY`,
//! `DD.MM.YYYY` (tried in that order, first successful parse wins); omitted
//! fields default to the current month and year. The unit is one of `сут`
//! (days), `мес` (months, 30 days) or `лет` (years, 365 days).

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    /// The base date part matched none of the four patterns, or names an
    /// impossible calendar date.
    InvalidDate,
    /// The `+` modifier is malformed: bad count, unknown unit, or extra parts.
    InvalidModifier,
    /// The expression is well-formed but the resulting instant already
    /// passed. A soft warning: the user resends, no state is lost.
    InPast,
}

fn digits(s: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if s.len() >= min_len && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// Parse the base date part against the four accepted patterns.
pub fn parse_base_date(part: &str, today: NaiveDate) -> Option<NaiveDate> {
    let components: Vec<&str> = part.split('.').collect();
    match components.as_slice() {
        [d] => {
            let day = digits(d, 1, 2)?;
            NaiveDate::from_ymd_opt(today.year(), today.month(), day)
        }
        [d, m] => {
            let day = digits(d, 1, 2)?;
            let month = digits(m, 1, 2)?;
            NaiveDate::from_ymd_opt(today.year(), month, day)
        }
        [d, m, y] => {
            let day = digits(d, 1, 2)?;
            let month = digits(m, 1, 2)?;
            // Two-digit years pivot at 68, same as the common strftime rule.
            let year = match y.len() {
                2 => {
                    let short = digits(y, 2, 2)? as i32;
                    if short <= 68 {
                        2000 + short
                    } else {
                        1900 + short
                    }
                }
                4 => digits(y, 4, 4)? as i32,
                _ => return None,
            };
            NaiveDate::from_ymd_opt(year, month, day)
        }
        _ => None,
    }
}

fn unit_days(unit: &str) -> Option<i64> {
    match unit {
        "сут" => Some(1),
        "мес" => Some(30),
        "лет" => Some(365),
        _ => None,
    }
}

/// Parse a full expiry expression into an instant (midnight UTC of the base
/// date, shifted by the modifier).
pub fn parse_expiry(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, DateError> {
    let parts: Vec<&str> = input
        .split('+')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let (base_part, modifier_part) = match parts.as_slice() {
        [] => return Err(DateError::InvalidDate),
        [base] => (*base, None),
        [base, modifier] => (*base, Some(*modifier)),
        _ => return Err(DateError::InvalidModifier),
    };

    let base = parse_base_date(base_part, now.date_naive()).ok_or(DateError::InvalidDate)?;
    let mut expires = Utc.from_utc_datetime(&base.and_time(NaiveTime::MIN));

    if let Some(modifier) = modifier_part {
        let tokens: Vec<&str> = modifier.split_whitespace().collect();
        let [count, unit] = tokens.as_slice() else {
            return Err(DateError::InvalidModifier);
        };
        let count = count.parse::<u32>().map_err(|_| DateError::InvalidModifier)?;
        let days = i64::from(count) * unit_days(unit).ok_or(DateError::InvalidModifier)?;
        expires = expires
            .checked_add_signed(Duration::days(days))
            .ok_or(DateError::InvalidDate)?;
    }

    if expires < now {
        return Err(DateError::InPast);
    }
    Ok(expires)
}
