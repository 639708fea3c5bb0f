use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{accounts::Viewer, enums::roles::Role},
};

/// Decides whether a viewer may see a plan's full details: trainers always,
/// members only after subscribing, anonymous viewers never.
pub struct PlanAccess<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
}

impl<S> PlanAccess<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>) -> Self {
        Self { subscription_repo }
    }

    pub async fn can_view_full_details(
        &self,
        viewer: Option<Viewer>,
        plan_id: i64,
    ) -> Result<bool> {
        let Some(viewer) = viewer else {
            return Ok(false);
        };

        if viewer.role == Role::Trainer {
            debug!(account_id = viewer.account_id, plan_id, "plan_access: trainer viewer");
            return Ok(true);
        }

        let subscription = self
            .subscription_repo
            .find_by_member_and_plan(viewer.account_id, plan_id)
            .await?;

        Ok(subscription.is_some())
    }
}
