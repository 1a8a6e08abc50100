//! The `/new` flow: request a name, request an expiry date expression,
//! allocate a code and insert the product.

pub mod dates;
pub mod run;
pub mod ui;
