use std::{collections::HashSet, sync::Arc};

use tracing::{error, info, warn};

use crate::{
    domain::{
        repositories::{
            follows::FollowRepository, plans::PlanRepository,
            subscriptions::SubscriptionRepository,
        },
        value_objects::{
            accounts::Viewer,
            enums::{feed_sources::FeedSource, roles::Role},
            feed::FeedEntryDto,
            plans::PlanWithTrainerDto,
        },
    },
    usecases::error::{UseCaseError, UseCaseResult},
};

pub struct FeedUseCase<F, S, P>
where
    F: FollowRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    follow_repo: Arc<F>,
    subscription_repo: Arc<S>,
    plan_repo: Arc<P>,
}

impl<F, S, P> FeedUseCase<F, S, P>
where
    F: FollowRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(follow_repo: Arc<F>, subscription_repo: Arc<S>, plan_repo: Arc<P>) -> Self {
        Self {
            follow_repo,
            subscription_repo,
            plan_repo,
        }
    }

    /// Assembles the member's feed: plans from followed trainers first, then
    /// purchased plans not already present. Each plan appears exactly once.
    pub async fn personalized_feed(&self, viewer: Viewer) -> UseCaseResult<Vec<FeedEntryDto>> {
        if viewer.role != Role::Member {
            let err = UseCaseError::Forbidden("Access denied");
            warn!(
                account_id = viewer.account_id,
                status = err.status_code().as_u16(),
                "feed: non-member viewer rejected"
            );
            return Err(err);
        }

        let member_id = viewer.account_id;
        info!(member_id, "feed: assembling personalized feed");

        let followed_trainer_ids = self
            .follow_repo
            .list_followed_trainer_ids(member_id)
            .await
            .map_err(|err| {
                error!(member_id, db_error = ?err, "feed: failed to list followed trainers");
                UseCaseError::Internal(err)
            })?;

        let subscribed_plan_ids = self
            .subscription_repo
            .list_subscribed_plan_ids(member_id)
            .await
            .map_err(|err| {
                error!(member_id, db_error = ?err, "feed: failed to list subscribed plan ids");
                UseCaseError::Internal(err)
            })?;

        let followed_plans = self
            .plan_repo
            .list_by_trainer_ids(&followed_trainer_ids)
            .await
            .map_err(|err| {
                error!(member_id, db_error = ?err, "feed: failed to load followed trainer plans");
                UseCaseError::Internal(err)
            })?;

        let purchased_plans = self
            .plan_repo
            .list_by_ids(&subscribed_plan_ids)
            .await
            .map_err(|err| {
                error!(member_id, db_error = ?err, "feed: failed to load purchased plans");
                UseCaseError::Internal(err)
            })?;

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(followed_plans.len() + purchased_plans.len());

        for (plan, trainer) in followed_plans {
            let is_purchased = subscribed_plan_ids.contains(&plan.id);
            seen.insert(plan.id);
            entries.push(FeedEntryDto::new(
                PlanWithTrainerDto::from_entities(plan, trainer),
                FeedSource::FollowedTrainer,
                is_purchased,
            ));
        }

        for (plan, trainer) in purchased_plans {
            if seen.insert(plan.id) {
                entries.push(FeedEntryDto::new(
                    PlanWithTrainerDto::from_entities(plan, trainer),
                    FeedSource::Purchased,
                    true,
                ));
            }
        }

        info!(member_id, entry_count = entries.len(), "feed: feed assembled");
        Ok(entries)
    }
}
