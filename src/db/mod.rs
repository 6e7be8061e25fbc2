//! Database module
//!
//! Connection pool setup, schema initialization, and the user repository.
//! Repository functions take the caller's connection and keep no state
//! between calls.

pub mod models;
pub mod operations;
pub mod pool;
pub mod schema;

pub use models::{CreateOutcome, NewUser, UpdateOutcome, User, UserField, UserUpdate};
pub use operations::{create_user, delete_user, get_all_users, update_user};
pub use pool::{connect_pool, DbPoolStatus};
pub use schema::ensure_schema;
