//! Data structures that map to database tables or query results.

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

/// The single pending multi-step conversational state of a user.
///
/// Persisted in `users.current_action` as tagged JSON (`NULL` = no pending
/// action); the rest of the application only ever sees this enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CurrentAction {
    /// `/new` was issued; the next message is the product name.
    RequestName,
    /// The name is captured; the next message is the expiry date expression.
    RequestDate { name: String },
    /// `/acceptinvite` was issued; the next message is an invite code.
    AcceptInvite,
    /// `/inventory` was issued; the next message lists the codes found.
    InventoryAudit,
}

/// A registered bot user. `family` starts out equal to `id` and changes only
/// when an invite is redeemed.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub family: i64,
    pub current_action: Option<CurrentAction>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Product {
    pub code: i32,
    pub family: i64,
    pub name: String,
    pub expires: DateTime<Utc>,
    pub withdrawn: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires < now
    }
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Invite {
    pub code: i32,
    pub family: i64,
    pub expires: DateTime<Utc>,
}

/// Decode the stored `current_action` column. Corrupt or unrecognized
/// payloads decode to "no pending action" rather than failing the event.
pub fn decode_current_action(raw: Option<&str>) -> Option<CurrentAction> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(action) => Some(action),
        Err(err) => {
            tracing::warn!(target: "database.users", error = %err, "discarding undecodable current_action");
            None
        }
    }
}

/// Encode a pending action for storage. `None` maps to a NULL column.
pub fn encode_current_action(action: Option<&CurrentAction>) -> Option<String> {
    action.map(|a| serde_json::to_string(a).expect("CurrentAction serializes to JSON"))
}
