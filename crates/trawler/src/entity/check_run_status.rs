//! Execution status of a check run or check suite.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CheckRunStatus {
    #[sea_orm(string_value = "queued")]
    Queued,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "requested")]
    Requested,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "unknown")]
    #[default]
    Unknown,
}

impl CheckRunStatus {
    pub fn from_remote(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("queued") => Self::Queued,
            Some("in_progress") => Self::InProgress,
            Some("completed") => Self::Completed,
            Some("waiting") => Self::Waiting,
            Some("requested") => Self::Requested,
            Some("pending") => Self::Pending,
            _ => Self::Unknown,
        }
    }

    #[inline]
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_is_completed() {
        assert!(CheckRunStatus::from_remote(Some("completed")).is_completed());
        assert!(!CheckRunStatus::from_remote(Some("in_progress")).is_completed());
        assert_eq!(CheckRunStatus::from_remote(None), CheckRunStatus::Unknown);
    }
}
