//! Shared database types.

use sqlx::{Pool, Postgres};

/// A type alias for the database connection pool (`Pool<Postgres>`), used
/// throughout the application as the shared connection state.
pub type DbPool = Pool<Postgres>;
