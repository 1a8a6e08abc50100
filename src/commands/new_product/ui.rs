//! Reply texts for the product registration flow.

use chrono::{DateTime, Utc};

use crate::ui::{format_date_long, Reply};

use super::dates::DateError;

pub fn prompt_name() -> Reply {
    Reply::text("Enter the product name (e.g. <i>milk</i>)")
}

pub fn prompt_date() -> Reply {
    Reply::text(
        "Enter the expiry date (e.g. 12, 12.06, 12.06.24, 12.06.2024). \
         A shelf life can be appended to it: 12.06 + 10 сут/мес/лет",
    )
}

pub fn blocked_by_expired() -> Reply {
    Reply::text(
        "Your family still has expired products on the shelf. \
         Review them with /listexpired and withdraw them before adding new ones.",
    )
}

pub fn date_error(error: DateError) -> Reply {
    match error {
        DateError::InvalidDate => Reply::text("That date could not be understood"),
        DateError::InvalidModifier => Reply::text("That date modifier could not be understood"),
        DateError::InPast => {
            Reply::text("That date is already in the past. Has the product expired?")
        }
    }
}

pub fn created(code: i32, expires: DateTime<Utc>) -> Reply {
    Reply::text(format!(
        "Code of the new product: <b>{code}</b>\nBest before: {}",
        format_date_long(expires)
    ))
}
