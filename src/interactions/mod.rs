//! Routing for inline-keyboard callback queries. `handler.rs` answers the
//! query, parses the callback id via [`ids`] and delegates here.

pub mod ids;
pub mod withdraw_handler;
