use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::{
    accounts::AccountEntity,
    plans::{EditPlanEntity, InsertPlanEntity, PlanEntity},
};

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn create(&self, entity: InsertPlanEntity) -> Result<PlanEntity>;
    async fn find_by_id(&self, id: i64) -> Result<Option<(PlanEntity, AccountEntity)>>;
    /// Newest first, with each plan's trainer row.
    async fn list_all(&self) -> Result<Vec<(PlanEntity, AccountEntity)>>;
    async fn list_by_trainer(&self, trainer_id: i64) -> Result<Vec<PlanEntity>>;
    async fn list_by_trainer_ids(&self, trainer_ids: &[i64]) -> Result<Vec<(PlanEntity, AccountEntity)>>;
    async fn list_by_ids(&self, plan_ids: &[i64]) -> Result<Vec<(PlanEntity, AccountEntity)>>;
    async fn update(&self, id: i64, entity: EditPlanEntity) -> Result<PlanEntity>;
    async fn delete(&self, id: i64) -> Result<()>;
}
