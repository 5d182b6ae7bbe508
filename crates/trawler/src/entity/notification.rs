//! Notification entity - append-only events derived from state transitions.
//!
//! Notifications are self-describing: the triggering review or status snapshot
//! may be pruned long before the notification itself expires, so everything a
//! consumer needs to render it is copied onto the row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::notification_kind::NotificationKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: NotificationKind,
    pub repository_full_name: String,
    pub pull_request_id: Option<Uuid>,
    pub pull_request_number: Option<i64>,
    /// Login of the user the notification is addressed to.
    pub user_login: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub review_id: Option<Uuid>,
    pub status_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    /// Whether the notification has been delivered to the user.
    pub toasted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
