use crate::{
    auth::AuthUser,
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::subscriptions::SubscribeModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{plans::PlanPostgres, subscriptions::SubscriptionPostgres},
    },
    usecases::subscriptions::SubscriptionUseCase,
};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct CheckSubscriptionQuery {
    #[serde(rename = "planId")]
    plan_id: i64,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let subscription_usecase =
        SubscriptionUseCase::new(Arc::new(subscription_repository), Arc::new(plan_repository));

    Router::new()
        .route("/", post(subscribe))
        .route("/my-subscriptions", get(my_subscriptions))
        .route("/check", get(check_subscription))
        .with_state(Arc::new(subscription_usecase))
}

pub async fn subscribe<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
    Json(subscribe_model): Json<SubscribeModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(
        account_id = auth.account_id,
        plan_id = subscribe_model.plan_id,
        "subscriptions: subscribe request received"
    );
    match subscription_usecase
        .subscribe(auth.viewer(), subscribe_model.plan_id)
        .await
    {
        Ok(subscription) => (StatusCode::CREATED, Json(subscription)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn my_subscriptions<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(account_id = auth.account_id, "subscriptions: my-subscriptions request received");
    match subscription_usecase.my_subscriptions(auth.viewer()).await {
        Ok(subscriptions) => Json(subscriptions).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn check_subscription<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
    Query(query): Query<CheckSubscriptionQuery>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match subscription_usecase
        .check(auth.viewer(), query.plan_id)
        .await
    {
        Ok(status) => Json(status).into_response(),
        Err(err) => err.into_response(),
    }
}
