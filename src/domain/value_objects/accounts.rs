use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::accounts::{AccountEntity, EditAccountEntity, RegisterAccountEntity},
    value_objects::{enums::roles::Role, plans::PlanDto},
};

/// Resolved identity the use cases operate on. Built from a validated token,
/// never from request payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub account_id: i64,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountDto {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountEntity> for AccountDto {
    fn from(value: AccountEntity) -> Self {
        Self {
            id: value.id,
            display_name: value.display_name,
            email: value.email,
            role: value.role,
            bio: value.bio,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Public view of a trainer. Email stays private to the account owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerSnippetDto {
    pub id: i64,
    pub display_name: String,
    pub bio: String,
}

impl From<AccountEntity> for TrainerSnippetDto {
    fn from(value: AccountEntity) -> Self {
        Self {
            id: value.id,
            display_name: value.display_name,
            bio: value.bio,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerProfileDto {
    pub trainer: TrainerSnippetDto,
    pub plans: Vec<PlanDto>,
    #[serde(rename = "isFollowing")]
    pub is_following: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAccountModel {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub bio: Option<String>,
}

impl RegisterAccountModel {
    pub fn to_entity(&self, password_hash: String, role: Role) -> RegisterAccountEntity {
        RegisterAccountEntity {
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            password_hash,
            role: role.to_string(),
            bio: self.bio.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginModel {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditAccountModel {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
}

impl EditAccountModel {
    pub fn to_entity(&self, password_hash: Option<String>) -> EditAccountEntity {
        EditAccountEntity {
            display_name: self.display_name.clone(),
            bio: self.bio.clone(),
            password_hash,
            updated_at: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponseDto {
    pub token: String,
    pub account: AccountDto,
}
