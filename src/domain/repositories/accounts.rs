use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    entities::accounts::{AccountEntity, EditAccountEntity, RegisterAccountEntity},
    value_objects::unique_insert::UniqueInsert,
};

#[async_trait]
#[automock]
pub trait AccountRepository {
    async fn register(&self, entity: RegisterAccountEntity) -> Result<UniqueInsert<AccountEntity>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<AccountEntity>>;
    async fn find_by_email(&self, email: String) -> Result<Option<AccountEntity>>;
    async fn update(&self, id: i64, entity: EditAccountEntity) -> Result<AccountEntity>;
}
