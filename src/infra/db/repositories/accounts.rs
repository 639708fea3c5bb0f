use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*, result::DatabaseErrorKind};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::accounts},
};
use domain::{
    entities::accounts::{AccountEntity, EditAccountEntity, RegisterAccountEntity},
    repositories::accounts::AccountRepository,
    value_objects::unique_insert::UniqueInsert,
};

pub struct AccountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AccountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AccountRepository for AccountPostgres {
    async fn register(&self, entity: RegisterAccountEntity) -> Result<UniqueInsert<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(accounts::table)
            .values(&entity)
            .returning(AccountEntity::as_select())
            .get_result::<AccountEntity>(&mut conn);

        match result {
            Ok(account) => Ok(UniqueInsert::Inserted(account)),
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Ok(UniqueInsert::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = accounts::table
            .find(id)
            .select(AccountEntity::as_select())
            .first::<AccountEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_email(&self, email: String) -> Result<Option<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = accounts::table
            .filter(accounts::email.eq(email))
            .select(AccountEntity::as_select())
            .first::<AccountEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update(&self, id: i64, entity: EditAccountEntity) -> Result<AccountEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = diesel::update(accounts::table.find(id))
            .set(&entity)
            .returning(AccountEntity::as_select())
            .get_result::<AccountEntity>(&mut conn)?;

        Ok(result)
    }
}
