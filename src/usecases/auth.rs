use std::sync::Arc;

use anyhow::{Context, Result as AnyResult, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tracing::{error, info, warn};

use crate::{
    auth::TokenClaims,
    config::config_model::AuthTokens,
    domain::{
        entities::accounts::AccountEntity,
        repositories::accounts::AccountRepository,
        value_objects::{
            accounts::{AccountDto, AuthResponseDto, LoginModel, RegisterAccountModel},
            enums::roles::Role,
            unique_insert::UniqueInsert,
        },
    },
    usecases::error::{UseCaseError, UseCaseResult},
};

const MIN_PASSWORD_LEN: usize = 8;

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    fn hash_password(&self, password: &str) -> AnyResult<String>;
    fn verify_password(&self, password: &str, password_hash: &str) -> AnyResult<bool>;
}

pub struct ArgonCredentialHasher;

impl CredentialHasher for ArgonCredentialHasher {
    fn hash_password(&self, password: &str) -> AnyResult<String> {
        let salt = SaltString::generate(&mut rand::rngs::OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| anyhow!("failed to hash password: {err}"))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> AnyResult<bool> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|err| anyhow!("stored password hash is malformed: {err}"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

pub struct AuthUseCase<A, H>
where
    A: AccountRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    credential_hasher: Arc<H>,
    auth_tokens: AuthTokens,
}

impl<A, H> AuthUseCase<A, H>
where
    A: AccountRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>, credential_hasher: Arc<H>, auth_tokens: AuthTokens) -> Self {
        Self {
            account_repo,
            credential_hasher,
            auth_tokens,
        }
    }

    /// Registers an account. Email uniqueness is checked up front and enforced
    /// again by the database constraint; both paths reject the same way.
    pub async fn register(&self, model: RegisterAccountModel) -> UseCaseResult<AuthResponseDto> {
        info!(email = %model.email, role = %model.role, "auth: register requested");

        if model.display_name.trim().is_empty() {
            return Err(self.invalid_input("Display name is required"));
        }
        if model.email.trim().is_empty() || !model.email.contains('@') {
            return Err(self.invalid_input("A valid email is required"));
        }
        if model.password.len() < MIN_PASSWORD_LEN {
            return Err(self.invalid_input("Password must be at least 8 characters"));
        }
        let Some(role) = Role::from_str(&model.role) else {
            return Err(self.invalid_input("Role must be member or trainer"));
        };

        if self
            .account_repo
            .find_by_email(model.email.clone())
            .await
            .map_err(|err| {
                error!(email = %model.email, db_error = ?err, "auth: failed to check email");
                UseCaseError::Internal(err)
            })?
            .is_some()
        {
            let err = UseCaseError::EmailTaken;
            warn!(
                email = %model.email,
                status = err.status_code().as_u16(),
                "auth: email already registered"
            );
            return Err(err);
        }

        let password_hash = self
            .credential_hasher
            .hash_password(&model.password)
            .map_err(|err| {
                error!(email = %model.email, hash_error = ?err, "auth: failed to hash password");
                UseCaseError::Internal(err)
            })?;

        let account = match self
            .account_repo
            .register(model.to_entity(password_hash, role))
            .await
            .map_err(|err| {
                error!(email = %model.email, db_error = ?err, "auth: failed to insert account");
                UseCaseError::Internal(err)
            })? {
            UniqueInsert::Inserted(account) => account,
            UniqueInsert::AlreadyExists => {
                let err = UseCaseError::EmailTaken;
                warn!(
                    email = %model.email,
                    status = err.status_code().as_u16(),
                    "auth: email already registered, caught by constraint"
                );
                return Err(err);
            }
        };

        info!(account_id = account.id, "auth: account registered");
        let token = self.sign_token(&account)?;

        Ok(AuthResponseDto {
            token,
            account: AccountDto::from(account),
        })
    }

    pub async fn login(&self, model: LoginModel) -> UseCaseResult<AuthResponseDto> {
        info!(email = %model.email, "auth: login requested");

        let account = match self
            .account_repo
            .find_by_email(model.email.clone())
            .await
            .map_err(|err| {
                error!(email = %model.email, db_error = ?err, "auth: failed to load account");
                UseCaseError::Internal(err)
            })? {
            Some(account) => account,
            None => {
                let err = UseCaseError::InvalidCredentials;
                warn!(
                    email = %model.email,
                    status = err.status_code().as_u16(),
                    "auth: unknown email"
                );
                return Err(err);
            }
        };

        let verified = self
            .credential_hasher
            .verify_password(&model.password, &account.password_hash)
            .map_err(|err| {
                error!(
                    account_id = account.id,
                    hash_error = ?err,
                    "auth: failed to verify password"
                );
                UseCaseError::Internal(err)
            })?;

        if !verified {
            let err = UseCaseError::InvalidCredentials;
            warn!(
                account_id = account.id,
                status = err.status_code().as_u16(),
                "auth: password mismatch"
            );
            return Err(err);
        }

        info!(account_id = account.id, "auth: login succeeded");
        let token = self.sign_token(&account)?;

        Ok(AuthResponseDto {
            token,
            account: AccountDto::from(account),
        })
    }

    fn sign_token(&self, account: &AccountEntity) -> UseCaseResult<String> {
        let ttl = i64::try_from(self.auth_tokens.ttl_seconds)
            .context("token ttl_seconds is too large")
            .map_err(UseCaseError::Internal)?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(Duration::seconds(ttl))
            .ok_or_else(|| UseCaseError::Internal(anyhow!("failed to compute token expiration")))?;

        let claims = TokenClaims {
            sub: account.id.to_string(),
            role: account.role.clone(),
            email: account.email.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.auth_tokens.jwt_secret.as_bytes()),
        )
        .map_err(|err| {
            error!(account_id = account.id, error = ?err, "auth: failed to sign token");
            UseCaseError::Internal(err.into())
        })
    }

    fn invalid_input(&self, message: &str) -> UseCaseError {
        let err = UseCaseError::InvalidInput(message.to_string());
        warn!(status = err.status_code().as_u16(), "auth: invalid input: {message}");
        err
    }
}
