//! Aggregate check state of a pull request snapshot.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum StatusState {
    /// No checks or statuses reported for the head commit.
    #[sea_orm(string_value = "none")]
    #[default]
    None,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "succeeded")]
    Succeeded,
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl std::fmt::Display for StatusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusState::None => write!(f, "none"),
            StatusState::Pending => write!(f, "pending"),
            StatusState::Succeeded => write!(f, "succeeded"),
            StatusState::Failed => write!(f, "failed"),
        }
    }
}
