//! Conclusion of a completed check run or check suite.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Check conclusions as reported by the remote checks API.
///
/// `None` covers checks that have not concluded yet (queued or in progress)
/// as well as conclusions the remote reports that we don't recognize.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CheckConclusion {
    #[sea_orm(string_value = "none")]
    #[default]
    None,
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "neutral")]
    Neutral,
    #[sea_orm(string_value = "skipped")]
    Skipped,
    #[sea_orm(string_value = "stale")]
    Stale,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "action_required")]
    ActionRequired,
    #[sea_orm(string_value = "timed_out")]
    TimedOut,
    #[sea_orm(string_value = "startup_failure")]
    StartupFailure,
    #[sea_orm(string_value = "failure")]
    Failure,
}

impl CheckConclusion {
    /// Parse the remote wire value (`"success"`, `"action_required"`, ...).
    pub fn from_remote(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("success") => Self::Success,
            Some("neutral") => Self::Neutral,
            Some("skipped") => Self::Skipped,
            Some("stale") => Self::Stale,
            Some("cancelled") => Self::Cancelled,
            Some("action_required") => Self::ActionRequired,
            Some("timed_out") => Self::TimedOut,
            Some("startup_failure") => Self::StartupFailure,
            Some("failure") => Self::Failure,
            _ => Self::None,
        }
    }

    /// Whether this conclusion blocks the pull request.
    pub fn is_failed(self) -> bool {
        matches!(
            self,
            Self::Failure
                | Self::TimedOut
                | Self::StartupFailure
                | Self::ActionRequired
                | Self::Cancelled
        )
    }

    /// Whether this conclusion counts as a pass.
    pub fn is_succeeded(self) -> bool {
        matches!(self, Self::Success | Self::Neutral | Self::Skipped | Self::Stale)
    }

    /// Ordering used to pick the aggregate conclusion of several checks.
    pub fn severity(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Success => 1,
            Self::Skipped => 2,
            Self::Neutral => 3,
            Self::Stale => 4,
            Self::Cancelled => 5,
            Self::ActionRequired => 6,
            Self::TimedOut => 7,
            Self::StartupFailure => 8,
            Self::Failure => 9,
        }
    }
}

impl std::fmt::Display for CheckConclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Success => "success",
            Self::Neutral => "neutral",
            Self::Skipped => "skipped",
            Self::Stale => "stale",
            Self::Cancelled => "cancelled",
            Self::ActionRequired => "action_required",
            Self::TimedOut => "timed_out",
            Self::StartupFailure => "startup_failure",
            Self::Failure => "failure",
        };
        f.write_str(s)
    }
}
