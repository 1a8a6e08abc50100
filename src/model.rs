//! Shared application state, injected into every update handler through the
//! dispatcher's dependency map as an `Arc<AppState>`.

use crate::database::init::DbPool;

pub struct AppState {
    /// The connection pool for the PostgreSQL database.
    pub db: DbPool,
    /// Random per-process secret authorizing the maintenance commands.
    /// Logged once at startup; regenerated on every restart.
    pub maintenance_secret: String,
}
