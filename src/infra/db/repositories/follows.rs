use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    RunQueryDsl, dsl::count_star, insert_into, prelude::*, result::DatabaseErrorKind,
};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{accounts, follows},
    },
};
use domain::{
    entities::{
        accounts::AccountEntity,
        follows::{FollowEntity, InsertFollowEntity},
    },
    repositories::follows::FollowRepository,
    value_objects::unique_insert::UniqueInsert,
};

pub struct FollowPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl FollowPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl FollowRepository for FollowPostgres {
    async fn insert(&self, entity: InsertFollowEntity) -> Result<UniqueInsert<FollowEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(follows::table)
            .values(&entity)
            .returning(FollowEntity::as_select())
            .get_result::<FollowEntity>(&mut conn);

        match result {
            Ok(follow) => Ok(UniqueInsert::Inserted(follow)),
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Ok(UniqueInsert::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, member_id: i64, trainer_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::delete(
            follows::table
                .filter(follows::member_id.eq(member_id))
                .filter(follows::trainer_id.eq(trainer_id)),
        )
        .execute(&mut conn)?;

        Ok(())
    }

    async fn exists(&self, member_id: i64, trainer_id: i64) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = follows::table
            .filter(follows::member_id.eq(member_id))
            .filter(follows::trainer_id.eq(trainer_id))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total > 0)
    }

    async fn list_followed_trainer_ids(&self, member_id: i64) -> Result<Vec<i64>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = follows::table
            .filter(follows::member_id.eq(member_id))
            .select(follows::trainer_id)
            .order(follows::created_at.desc())
            .load::<i64>(&mut conn)?;

        Ok(results)
    }

    async fn list_followed_trainers(&self, member_id: i64) -> Result<Vec<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = follows::table
            .inner_join(accounts::table.on(follows::trainer_id.eq(accounts::id)))
            .filter(follows::member_id.eq(member_id))
            .select(AccountEntity::as_select())
            .order(follows::created_at.desc())
            .load::<AccountEntity>(&mut conn)?;

        Ok(results)
    }
}
