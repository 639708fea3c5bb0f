use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::follows;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(member_id, trainer_id))]
#[diesel(table_name = follows)]
pub struct FollowEntity {
    pub member_id: i64,
    pub trainer_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = follows)]
pub struct InsertFollowEntity {
    pub member_id: i64,
    pub trainer_id: i64,
}
