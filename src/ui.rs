//! Shared presentation helpers: the outbound [`Reply`] type, date formatting
//! and product-list rendering. Replies use Telegram HTML parse mode, so any
//! user-supplied string must pass through [`escape`] before interpolation.

use chrono::{DateTime, Utc};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html::escape;

use crate::database::models::Product;
use crate::interactions::ids;

/// One outbound message: HTML text plus an optional inline keyboard.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub markup: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
        }
    }

    pub fn with_markup(text: impl Into<String>, markup: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            markup: Some(markup),
        }
    }
}

/// Single "Withdraw" button keyed `withdraw_<code>`.
pub fn withdraw_keyboard(code: i32) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Withdraw",
        ids::withdraw_id(code),
    )]])
}

pub fn format_date_short(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%y").to_string()
}

pub fn format_date_long(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Render one product line for a list reply. Already-expired products carry
/// a warning marker so they stand out in the full `/list` view.
pub fn product_line(product: &Product, now: DateTime<Utc>) -> String {
    let flag = if product.is_expired(now) { "⚠️ " } else { "" };
    format!(
        "{flag}<b>#{code}</b> {name} (until {date})",
        code = product.code,
        name = escape(&product.name),
        date = format_date_short(product.expires),
    )
}

pub fn product_list(products: &[Product], now: DateTime<Utc>) -> String {
    products
        .iter()
        .map(|p| product_line(p, now))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detail card shown for a free-text code lookup, paired with the withdraw
/// button by the caller.
pub fn product_details(product: &Product) -> String {
    format!(
        "Product <b>#{code}</b>\n{name}\nBest before: {date}",
        code = product.code,
        name = escape(&product.name),
        date = format_date_long(product.expires),
    )
}
