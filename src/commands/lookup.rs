//! Fallback for free text with no pending action: a message that reads as a
//! product code shows that product's details with a withdraw button.

use sqlx::{Postgres, Transaction};

use crate::constants::{PRODUCT_CODE_MAX, PRODUCT_CODE_MIN};
use crate::database;
use crate::database::models::User;
use crate::ui::{self, Reply};

pub async fn run(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    text: &str,
) -> Result<Option<Reply>, sqlx::Error> {
    let Ok(code) = text.trim().parse::<i32>() else {
        return Ok(None);
    };
    if !(PRODUCT_CODE_MIN..=PRODUCT_CODE_MAX).contains(&code) {
        return Ok(None);
    }

    let reply = match database::products::find_by_code(tx, user.family, code).await? {
        None => Reply::text("No product with that code was found"),
        Some(product) if product.withdrawn.is_some() => {
            Reply::text("The product with that code has already been withdrawn")
        }
        Some(product) => {
            Reply::with_markup(ui::product_details(&product), ui::withdraw_keyboard(code))
        }
    };
    Ok(Some(reply))
}
