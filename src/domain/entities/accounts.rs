use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::accounts;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = accounts)]
pub struct AccountEntity {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub struct RegisterAccountEntity {
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub bio: String,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = accounts)]
pub struct EditAccountEntity {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub password_hash: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
