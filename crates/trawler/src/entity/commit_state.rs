//! Combined commit status state (the legacy statuses API).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CommitState {
    /// No combined status was reported for the commit.
    #[sea_orm(string_value = "none")]
    #[default]
    None,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "failure")]
    Failure,
    #[sea_orm(string_value = "error")]
    Error,
}

impl CommitState {
    pub fn from_remote(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "success" => Self::Success,
            "failure" => Self::Failure,
            "error" => Self::Error,
            _ => Self::None,
        }
    }

    #[inline]
    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failure | Self::Error)
    }
}

impl std::fmt::Display for CommitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitState::None => write!(f, "none"),
            CommitState::Pending => write!(f, "pending"),
            CommitState::Success => write!(f, "success"),
            CommitState::Failure => write!(f, "failure"),
            CommitState::Error => write!(f, "error"),
        }
    }
}
