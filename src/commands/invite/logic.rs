//! Pure decision logic for invite redemption. The caller gathers every input
//! under row locks inside the event's transaction; this module only decides.

use chrono::{DateTime, Utc};

use crate::database::models::Invite;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemRejection {
    /// No such invite, or its TTL has lapsed.
    NotFound,
    /// The invite points at the family the caller is already in.
    SameFamily,
    /// The caller's family still has active products and nobody else would
    /// keep looking after them.
    OwnActiveProducts,
    /// The caller's family still has active products shared with other
    /// members; switching would orphan the caller's view of them.
    SharedActiveProducts,
}

/// Decide whether the caller may switch families. Returns the target family
/// on success.
pub fn check_redemption(
    invite: Option<&Invite>,
    now: DateTime<Utc>,
    caller_family: i64,
    active_products: i64,
    other_members: i64,
) -> Result<i64, RedeemRejection> {
    let invite = match invite {
        Some(invite) if invite.expires >= now => invite,
        _ => return Err(RedeemRejection::NotFound),
    };

    if invite.family == caller_family {
        return Err(RedeemRejection::SameFamily);
    }

    if active_products > 0 {
        if other_members > 0 {
            return Err(RedeemRejection::SharedActiveProducts);
        }
        return Err(RedeemRejection::OwnActiveProducts);
    }

    Ok(invite.family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invite(family: i64, expires: DateTime<Utc>) -> Invite {
        Invite {
            code: 123456,
            family,
            expires,
        }
    }

    #[test]
    fn expired_invite_is_not_found() {
        let now = Utc::now();
        let stale = invite(7, now - Duration::minutes(1));
        assert_eq!(
            check_redemption(Some(&stale), now, 1, 0, 0),
            Err(RedeemRejection::NotFound)
        );
        assert_eq!(check_redemption(None, now, 1, 0, 0), Err(RedeemRejection::NotFound));
    }

    #[test]
    fn own_family_invite_is_rejected() {
        let now = Utc::now();
        let own = invite(1, now + Duration::hours(1));
        assert_eq!(
            check_redemption(Some(&own), now, 1, 0, 0),
            Err(RedeemRejection::SameFamily)
        );
    }

    #[test]
    fn active_products_block_the_switch_even_for_a_sole_member() {
        let now = Utc::now();
        let other = invite(7, now + Duration::hours(1));
        assert_eq!(
            check_redemption(Some(&other), now, 1, 3, 0),
            Err(RedeemRejection::OwnActiveProducts)
        );
        assert_eq!(
            check_redemption(Some(&other), now, 1, 3, 2),
            Err(RedeemRejection::SharedActiveProducts)
        );
    }

    #[test]
    fn sole_member_with_empty_shelf_may_switch() {
        let now = Utc::now();
        let other = invite(7, now + Duration::hours(1));
        assert_eq!(check_redemption(Some(&other), now, 1, 0, 0), Ok(7));
    }
}
