use crate::{
    auth::{AuthUser, OptionalAuthUser},
    domain::{
        repositories::{
            accounts::AccountRepository, follows::FollowRepository, plans::PlanRepository,
            subscriptions::SubscriptionRepository,
        },
        value_objects::accounts::EditAccountModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            accounts::AccountPostgres, follows::FollowPostgres, plans::PlanPostgres,
            subscriptions::SubscriptionPostgres,
        },
    },
    usecases::{
        accounts::AccountUseCase,
        auth::{ArgonCredentialHasher, CredentialHasher},
        feed::FeedUseCase,
        following::FollowingUseCase,
    },
};
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct FollowTrainerModel {
    #[serde(rename = "trainerId")]
    trainer_id: i64,
}

/// One router per usecase, merged under the same `/users` prefix.
pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    Router::new()
        .merge(feed_routes(Arc::clone(&db_pool)))
        .merge(following_routes(Arc::clone(&db_pool)))
        .merge(profile_routes(db_pool))
}

fn feed_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let follow_repository = FollowPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let feed_usecase = FeedUseCase::new(
        Arc::new(follow_repository),
        Arc::new(subscription_repository),
        Arc::new(plan_repository),
    );

    Router::new()
        .route("/feed", get(personalized_feed))
        .with_state(Arc::new(feed_usecase))
}

fn following_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let follow_repository = FollowPostgres::new(Arc::clone(&db_pool));
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let following_usecase =
        FollowingUseCase::new(Arc::new(follow_repository), Arc::new(account_repository));

    Router::new()
        .route("/follow", post(follow_trainer))
        .route("/unfollow", post(unfollow_trainer))
        .route("/followed-trainers", get(followed_trainers))
        .with_state(Arc::new(following_usecase))
}

fn profile_routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let follow_repository = FollowPostgres::new(Arc::clone(&db_pool));
    let account_usecase = AccountUseCase::new(
        Arc::new(account_repository),
        Arc::new(plan_repository),
        Arc::new(follow_repository),
        Arc::new(ArgonCredentialHasher),
    );

    Router::new()
        .route("/profile", get(profile).put(update_profile))
        .route("/trainer/:id", get(trainer_profile))
        .with_state(Arc::new(account_usecase))
}

pub async fn personalized_feed<F, S, P>(
    State(feed_usecase): State<Arc<FeedUseCase<F, S, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(account_id = auth.account_id, "users: feed request received");
    match feed_usecase.personalized_feed(auth.viewer()).await {
        Ok(feed) => Json(feed).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn follow_trainer<F, A>(
    State(following_usecase): State<Arc<FollowingUseCase<F, A>>>,
    auth: AuthUser,
    Json(follow_trainer_model): Json<FollowTrainerModel>,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    info!(
        account_id = auth.account_id,
        trainer_id = follow_trainer_model.trainer_id,
        "users: follow request received"
    );
    match following_usecase
        .follow_trainer(auth.viewer(), follow_trainer_model.trainer_id)
        .await
    {
        Ok(trainers) => Json(trainers).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn unfollow_trainer<F, A>(
    State(following_usecase): State<Arc<FollowingUseCase<F, A>>>,
    auth: AuthUser,
    Json(follow_trainer_model): Json<FollowTrainerModel>,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    info!(
        account_id = auth.account_id,
        trainer_id = follow_trainer_model.trainer_id,
        "users: unfollow request received"
    );
    match following_usecase
        .unfollow_trainer(auth.viewer(), follow_trainer_model.trainer_id)
        .await
    {
        Ok(trainers) => Json(trainers).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn followed_trainers<F, A>(
    State(following_usecase): State<Arc<FollowingUseCase<F, A>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    match following_usecase.followed_trainers(auth.viewer()).await {
        Ok(trainers) => Json(trainers).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn profile<A, P, F, H>(
    State(account_usecase): State<Arc<AccountUseCase<A, P, F, H>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    F: FollowRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    match account_usecase.profile(auth.viewer()).await {
        Ok(account) => Json(account).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_profile<A, P, F, H>(
    State(account_usecase): State<Arc<AccountUseCase<A, P, F, H>>>,
    auth: AuthUser,
    Json(edit_account_model): Json<EditAccountModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    F: FollowRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    info!(account_id = auth.account_id, "users: profile update request received");
    match account_usecase
        .update_profile(auth.viewer(), edit_account_model)
        .await
    {
        Ok(account) => Json(account).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn trainer_profile<A, P, F, H>(
    State(account_usecase): State<Arc<AccountUseCase<A, P, F, H>>>,
    viewer: OptionalAuthUser,
    Path(trainer_id): Path<i64>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    F: FollowRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    match account_usecase
        .trainer_profile(viewer.viewer(), trainer_id)
        .await
    {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => err.into_response(),
    }
}
