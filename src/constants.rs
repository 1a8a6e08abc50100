// Central constants for code allocation, list sizes and retention windows.

/// Product codes are 8 digits. The range was widened from the original four
/// digits once larger shared inventories started colliding during allocation.
pub const PRODUCT_CODE_MIN: i32 = 10_000_000;
pub const PRODUCT_CODE_MAX: i32 = 99_999_999;

/// Invite codes are 6 digits and globally unique while the invite is live.
pub const INVITE_CODE_MIN: i32 = 100_000;
pub const INVITE_CODE_MAX: i32 = 999_999;

/// How long a freshly issued invite can be redeemed.
pub const INVITE_TTL_SECS: i64 = 3600;

/// Upper bound on the number of products rendered per list reply.
pub const LIST_LIMIT: i64 = 20;

/// Withdrawn products stay queryable for this many days past their expiry
/// date before the retention job deletes them.
pub const RETENTION_GRACE_DAYS: i64 = 7;

/// Product names are stored as VARCHAR(100); longer input is truncated.
pub const PRODUCT_NAME_MAX_CHARS: usize = 100;

/// Length of the per-process maintenance secret.
pub const MAINTENANCE_SECRET_LEN: usize = 32;
