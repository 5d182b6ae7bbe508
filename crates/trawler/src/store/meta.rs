use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entity::meta_data::{ActiveModel, Entity as MetaData, LAST_UPDATED_KEY};

use super::errors::Result;

pub async fn get<C: ConnectionTrait>(conn: &C, key: &str) -> Result<Option<String>> {
    Ok(MetaData::find_by_id(key.to_string())
        .one(conn)
        .await?
        .map(|m| m.value))
}

pub async fn set<C: ConnectionTrait>(conn: &C, key: &str, value: String) -> Result<()> {
    let exists = MetaData::find_by_id(key.to_string()).one(conn).await?.is_some();
    let model = ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
    };
    if exists {
        model.update(conn).await?;
    } else {
        model.insert(conn).await?;
    }
    Ok(())
}

/// Time of the last successful sync, if any.
///
/// An unparsable stored value reads as never updated.
pub async fn last_updated<C: ConnectionTrait>(conn: &C) -> Result<Option<DateTime<Utc>>> {
    Ok(get(conn, LAST_UPDATED_KEY).await?.and_then(|value| {
        DateTime::parse_from_rfc3339(&value)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }))
}

pub async fn set_last_updated<C: ConnectionTrait>(conn: &C, at: DateTime<Utc>) -> Result<()> {
    set(conn, LAST_UPDATED_KEY, at.to_rfc3339()).await
}
