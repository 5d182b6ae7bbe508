//! SeaORM entity definitions for the trawler cache schema.

pub mod check_conclusion;
pub mod check_run;
pub mod check_run_status;
pub mod check_suite;
pub mod commit_combined_status;
pub mod commit_state;
pub mod developer;
pub mod issue;
pub mod meta_data;
pub mod notification;
pub mod notification_kind;
pub mod prelude;
pub mod pull_request;
pub mod pull_request_status;
pub mod release;
pub mod repository;
pub mod review;
pub mod search;
pub mod search_issue;
pub mod status_state;
