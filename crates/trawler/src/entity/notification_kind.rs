//! Kinds of notifications derived from observed state transitions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum NotificationKind {
    #[sea_orm(string_value = "new_review")]
    NewReview,
    #[sea_orm(string_value = "check_run_failed")]
    CheckRunFailed,
    #[sea_orm(string_value = "check_run_succeeded")]
    CheckRunSucceeded,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::NewReview => write!(f, "new review"),
            NotificationKind::CheckRunFailed => write!(f, "checks failed"),
            NotificationKind::CheckRunSucceeded => write!(f, "checks succeeded"),
        }
    }
}
