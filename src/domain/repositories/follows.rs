use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    entities::{
        accounts::AccountEntity,
        follows::{FollowEntity, InsertFollowEntity},
    },
    value_objects::unique_insert::UniqueInsert,
};

#[async_trait]
#[automock]
pub trait FollowRepository {
    async fn insert(&self, entity: InsertFollowEntity) -> Result<UniqueInsert<FollowEntity>>;
    async fn delete(&self, member_id: i64, trainer_id: i64) -> Result<()>;
    async fn exists(&self, member_id: i64, trainer_id: i64) -> Result<bool>;
    async fn list_followed_trainer_ids(&self, member_id: i64) -> Result<Vec<i64>>;
    /// Most recently followed first.
    async fn list_followed_trainers(&self, member_id: i64) -> Result<Vec<AccountEntity>>;
}
