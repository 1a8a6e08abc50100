// Library entry so integration tests and external tools can reference
// internal modules. The binary (`main.rs`) uses the same set.
pub mod commands;
pub mod constants;
pub mod database;
pub mod handler;
pub mod interactions;
pub mod jobs;
pub mod model;
pub mod ui;

pub use model::AppState;
