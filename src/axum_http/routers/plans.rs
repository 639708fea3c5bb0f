use crate::{
    auth::{AuthUser, OptionalAuthUser},
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::plans::{AddPlanModel, EditPlanModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{plans::PlanPostgres, subscriptions::SubscriptionPostgres},
    },
    usecases::{plan_access::PlanAccess, plans::PlanUseCase},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use tracing::info;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));

    let plan_access = PlanAccess::new(Arc::new(subscription_repository));
    let plan_usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(plan_access));

    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/trainer/my-plans", get(my_plans))
        .route(
            "/:id",
            get(plan_detail).put(update_plan).delete(delete_plan),
        )
        .with_state(Arc::new(plan_usecase))
}

pub async fn list_plans<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match plan_usecase.list_plans().await {
        Ok(plans) => Json(plans).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn plan_detail<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    viewer: OptionalAuthUser,
    Path(plan_id): Path<i64>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match plan_usecase.plan_detail(viewer.viewer(), plan_id).await {
        Ok(plan) => Json(plan).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    auth: AuthUser,
    Json(add_plan_model): Json<AddPlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(account_id = auth.account_id, "plans: create request received");
    match plan_usecase.create_plan(auth.viewer(), add_plan_model).await {
        Ok(plan) => (StatusCode::CREATED, Json(plan)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    auth: AuthUser,
    Path(plan_id): Path<i64>,
    Json(edit_plan_model): Json<EditPlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(account_id = auth.account_id, plan_id, "plans: update request received");
    match plan_usecase
        .update_plan(auth.viewer(), plan_id, edit_plan_model)
        .await
    {
        Ok(plan) => Json(plan).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    auth: AuthUser,
    Path(plan_id): Path<i64>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(account_id = auth.account_id, plan_id, "plans: delete request received");
    match plan_usecase.delete_plan(auth.viewer(), plan_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn my_plans<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(account_id = auth.account_id, "plans: my-plans request received");
    match plan_usecase.my_plans(auth.viewer()).await {
        Ok(plans) => Json(plans).into_response(),
        Err(err) => err.into_response(),
    }
}
