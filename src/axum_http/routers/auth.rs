use crate::{
    config::config_model::AuthTokens,
    domain::{
        repositories::accounts::AccountRepository,
        value_objects::accounts::{LoginModel, RegisterAccountModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::accounts::AccountPostgres,
    },
    usecases::auth::{ArgonCredentialHasher, AuthUseCase, CredentialHasher},
};
use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use std::sync::Arc;
use tracing::info;

pub fn routes(db_pool: Arc<PgPoolSquad>, auth_tokens: AuthTokens) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let auth_usecase = AuthUseCase::new(
        Arc::new(account_repository),
        Arc::new(ArgonCredentialHasher),
        auth_tokens,
    );

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(Arc::new(auth_usecase))
}

pub async fn register<A, H>(
    State(auth_usecase): State<Arc<AuthUseCase<A, H>>>,
    Json(register_account_model): Json<RegisterAccountModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    info!(email = %register_account_model.email, "auth: register request received");
    match auth_usecase.register(register_account_model).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn login<A, H>(
    State(auth_usecase): State<Arc<AuthUseCase<A, H>>>,
    Json(login_model): Json<LoginModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    info!(email = %login_model.email, "auth: login request received");
    match auth_usecase.login(login_model).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => err.into_response(),
    }
}
