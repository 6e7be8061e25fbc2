//! HTTP surface for user records.

pub mod handlers;
pub mod validation;

pub use handlers::configure;
