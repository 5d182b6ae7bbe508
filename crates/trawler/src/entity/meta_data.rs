//! MetaData entity - a string key/value slot.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key under which the timestamp of the last successful sync is stored.
pub const LAST_UPDATED_KEY: &str = "last_updated";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meta_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
