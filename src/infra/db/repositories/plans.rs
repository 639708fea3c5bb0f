use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{accounts, plans},
    },
};
use domain::{
    entities::{
        accounts::AccountEntity,
        plans::{EditPlanEntity, InsertPlanEntity, PlanEntity},
    },
    repositories::plans::PlanRepository,
};

pub struct PlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn create(&self, entity: InsertPlanEntity) -> Result<PlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(plans::table)
            .values(&entity)
            .returning(PlanEntity::as_select())
            .get_result::<PlanEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<(PlanEntity, AccountEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = plans::table
            .inner_join(accounts::table.on(plans::trainer_id.eq(accounts::id)))
            .filter(plans::id.eq(id))
            .select((PlanEntity::as_select(), AccountEntity::as_select()))
            .first::<(PlanEntity, AccountEntity)>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<(PlanEntity, AccountEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .inner_join(accounts::table.on(plans::trainer_id.eq(accounts::id)))
            .select((PlanEntity::as_select(), AccountEntity::as_select()))
            .order(plans::created_at.desc())
            .load::<(PlanEntity, AccountEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_trainer(&self, trainer_id: i64) -> Result<Vec<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .filter(plans::trainer_id.eq(trainer_id))
            .select(PlanEntity::as_select())
            .order(plans::created_at.desc())
            .load::<PlanEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_trainer_ids(
        &self,
        trainer_ids: &[i64],
    ) -> Result<Vec<(PlanEntity, AccountEntity)>> {
        if trainer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .inner_join(accounts::table.on(plans::trainer_id.eq(accounts::id)))
            .filter(plans::trainer_id.eq_any(trainer_ids))
            .select((PlanEntity::as_select(), AccountEntity::as_select()))
            .order(plans::created_at.desc())
            .load::<(PlanEntity, AccountEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_ids(&self, plan_ids: &[i64]) -> Result<Vec<(PlanEntity, AccountEntity)>> {
        if plan_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .inner_join(accounts::table.on(plans::trainer_id.eq(accounts::id)))
            .filter(plans::id.eq_any(plan_ids))
            .select((PlanEntity::as_select(), AccountEntity::as_select()))
            .order(plans::created_at.desc())
            .load::<(PlanEntity, AccountEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn update(&self, id: i64, entity: EditPlanEntity) -> Result<PlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = diesel::update(plans::table.find(id))
            .set(&entity)
            .returning(PlanEntity::as_select())
            .get_result::<PlanEntity>(&mut conn)?;

        Ok(result)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::delete(plans::table.find(id)).execute(&mut conn)?;

        Ok(())
    }
}
