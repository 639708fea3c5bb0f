use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    entities::{
        plans::PlanEntity,
        subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    },
    value_objects::unique_insert::UniqueInsert,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn insert(
        &self,
        entity: InsertSubscriptionEntity,
    ) -> Result<UniqueInsert<SubscriptionEntity>>;
    async fn find_by_member_and_plan(
        &self,
        member_id: i64,
        plan_id: i64,
    ) -> Result<Option<SubscriptionEntity>>;
    /// Newest first, with each subscription's plan row.
    async fn list_by_member(&self, member_id: i64) -> Result<Vec<(SubscriptionEntity, PlanEntity)>>;
    async fn list_subscribed_plan_ids(&self, member_id: i64) -> Result<Vec<i64>>;
}
