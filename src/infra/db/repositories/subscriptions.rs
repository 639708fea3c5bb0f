use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*, result::DatabaseErrorKind};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{plans, subscriptions},
    },
};
use domain::{
    entities::{
        plans::PlanEntity,
        subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    },
    repositories::subscriptions::SubscriptionRepository,
    value_objects::unique_insert::UniqueInsert,
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn insert(
        &self,
        entity: InsertSubscriptionEntity,
    ) -> Result<UniqueInsert<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(subscriptions::table)
            .values(&entity)
            .returning(SubscriptionEntity::as_select())
            .get_result::<SubscriptionEntity>(&mut conn);

        match result {
            Ok(subscription) => Ok(UniqueInsert::Inserted(subscription)),
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Ok(UniqueInsert::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_member_and_plan(
        &self,
        member_id: i64,
        plan_id: i64,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .filter(subscriptions::member_id.eq(member_id))
            .filter(subscriptions::plan_id.eq(plan_id))
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_by_member(
        &self,
        member_id: i64,
    ) -> Result<Vec<(SubscriptionEntity, PlanEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .inner_join(plans::table.on(subscriptions::plan_id.eq(plans::id)))
            .filter(subscriptions::member_id.eq(member_id))
            .select((SubscriptionEntity::as_select(), PlanEntity::as_select()))
            .order(subscriptions::created_at.desc())
            .load::<(SubscriptionEntity, PlanEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn list_subscribed_plan_ids(&self, member_id: i64) -> Result<Vec<i64>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .filter(subscriptions::member_id.eq(member_id))
            .select(subscriptions::plan_id)
            .load::<i64>(&mut conn)?;

        Ok(results)
    }
}
