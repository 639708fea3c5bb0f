use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{
    config::config_loader,
    domain::value_objects::{accounts::Viewer, enums::roles::Role},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn viewer(&self) -> Viewer {
        Viewer {
            account_id: self.account_id,
            role: self.role,
        }
    }
}

/// Identity extractor for routes that work with or without a signed-in
/// account. A bad token is treated the same as no token.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn viewer(&self) -> Option<Viewer> {
        self.0.as_ref().map(AuthUser::viewer)
    }
}

pub fn validate_token(token: &str) -> anyhow::Result<TokenClaims> {
    let auth_tokens = config_loader::get_auth_tokens()?;

    let decoding_key = DecodingKey::from_secret(auth_tokens.jwt_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<TokenClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1. Get Authorization header
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        let auth_str = auth_header.to_str().map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header".to_string(),
            )
        })?;

        // 2. Expect "Bearer <token>"
        if !auth_str.starts_with("Bearer ") {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_str[7..];

        // 3. Validate JWT
        let claims =
            validate_token(token).map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

        // 4. Parse identity out of the claims
        let account_id = claims.sub.parse::<i64>().map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid account ID in token".to_string(),
            )
        })?;

        let role = Role::from_str(&claims.role).ok_or((
            StatusCode::UNAUTHORIZED,
            "Invalid role in token".to_string(),
        ))?;

        Ok(AuthUser {
            account_id,
            email: claims.email,
            role,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await.ok();
        Ok(OptionalAuthUser(auth_user))
    }
}
