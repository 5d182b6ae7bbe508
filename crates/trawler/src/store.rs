//! Cache store operations.
//!
//! Every function takes any [`sea_orm::ConnectionTrait`], so the same calls
//! run against a plain connection for reads and inside the orchestrator's
//! transaction (or a savepoint of it) for writes. Upserts find the row by
//! its external key and update or insert; unique indexes on those keys turn
//! a racing duplicate insert into an error instead of a second row.

pub mod checks;
pub mod developer;
mod errors;
pub mod issue;
pub mod meta;
pub mod notification;
pub mod pull_request;
pub mod release;
pub mod repository;
pub mod review;
pub mod search;
pub mod status;

pub use errors::{Result, StoreError};
pub use notification::NewNotification;
