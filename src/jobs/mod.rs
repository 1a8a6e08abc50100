//! Background job scheduler and the two batch operations: the expiry
//! notification sweep and the stale-withdrawn-record purge. Both operations
//! are plain async functions so the privileged maintenance commands can
//! invoke them outside the scheduler.

pub mod expiry_sweep;
pub mod retention_purge;
pub mod scheduler;

pub use expiry_sweep::ExpirySweepJob;
pub use retention_purge::RetentionPurgeJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
