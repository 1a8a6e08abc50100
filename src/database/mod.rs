//! Central hub for all database-related logic, split by entity:
//! `database::products::allocate_code`, `database::users::get_or_create` etc.

pub mod init;
pub mod invites;
pub mod models;
pub mod products;
pub mod users;
