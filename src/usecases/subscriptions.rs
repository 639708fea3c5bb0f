use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    domain::{
        entities::subscriptions::InsertSubscriptionEntity,
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::{
            accounts::Viewer,
            enums::roles::Role,
            subscriptions::{SubscriptionDto, SubscriptionStatusDto},
            unique_insert::UniqueInsert,
        },
    },
    usecases::error::{UseCaseError, UseCaseResult},
};

pub struct SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    plan_repo: Arc<P>,
}

impl<S, P> SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, plan_repo: Arc<P>) -> Self {
        Self {
            subscription_repo,
            plan_repo,
        }
    }

    /// Subscribes the member to a plan. Pre-check and unique constraint both
    /// map to the same conflict.
    pub async fn subscribe(&self, viewer: Viewer, plan_id: i64) -> UseCaseResult<SubscriptionDto> {
        self.ensure_member(&viewer, "subscribe")?;
        let member_id = viewer.account_id;
        info!(member_id, plan_id, "subscriptions: subscribe requested");

        let plan = match self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
            error!(member_id, plan_id, db_error = ?err, "subscriptions: failed to load plan");
            UseCaseError::Internal(err)
        })? {
            Some((plan, _trainer)) => plan,
            None => {
                let err = UseCaseError::NotFound("Plan");
                warn!(
                    member_id,
                    plan_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: plan not found"
                );
                return Err(err);
            }
        };

        if self
            .subscription_repo
            .find_by_member_and_plan(member_id, plan_id)
            .await
            .map_err(|err| {
                error!(
                    member_id,
                    plan_id,
                    db_error = ?err,
                    "subscriptions: failed to check existing subscription"
                );
                UseCaseError::Internal(err)
            })?
            .is_some()
        {
            let err = UseCaseError::AlreadySubscribed;
            warn!(
                member_id,
                plan_id,
                status = err.status_code().as_u16(),
                "subscriptions: duplicate subscription rejected"
            );
            return Err(err);
        }

        let entity = InsertSubscriptionEntity { member_id, plan_id };
        match self.subscription_repo.insert(entity).await.map_err(|err| {
            error!(member_id, plan_id, db_error = ?err, "subscriptions: failed to insert");
            UseCaseError::Internal(err)
        })? {
            UniqueInsert::Inserted(subscription) => {
                info!(member_id, plan_id, "subscriptions: subscription created");
                Ok(SubscriptionDto::from_entities(subscription, plan))
            }
            UniqueInsert::AlreadyExists => {
                let err = UseCaseError::AlreadySubscribed;
                warn!(
                    member_id,
                    plan_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: duplicate subscription rejected by constraint"
                );
                Err(err)
            }
        }
    }

    pub async fn my_subscriptions(&self, viewer: Viewer) -> UseCaseResult<Vec<SubscriptionDto>> {
        self.ensure_member(&viewer, "list subscriptions")?;
        let member_id = viewer.account_id;

        let subscriptions = self
            .subscription_repo
            .list_by_member(member_id)
            .await
            .map_err(|err| {
                error!(member_id, db_error = ?err, "subscriptions: failed to list subscriptions");
                UseCaseError::Internal(err)
            })?;

        Ok(subscriptions
            .into_iter()
            .map(|(subscription, plan)| SubscriptionDto::from_entities(subscription, plan))
            .collect())
    }

    pub async fn check(&self, viewer: Viewer, plan_id: i64) -> UseCaseResult<SubscriptionStatusDto> {
        self.ensure_member(&viewer, "check subscription")?;
        let member_id = viewer.account_id;

        let subscription = self
            .subscription_repo
            .find_by_member_and_plan(member_id, plan_id)
            .await
            .map_err(|err| {
                error!(member_id, plan_id, db_error = ?err, "subscriptions: failed to check");
                UseCaseError::Internal(err)
            })?;

        Ok(SubscriptionStatusDto {
            is_subscribed: subscription.is_some(),
        })
    }

    fn ensure_member(&self, viewer: &Viewer, action: &str) -> UseCaseResult<()> {
        if viewer.role != Role::Member {
            let err = UseCaseError::Forbidden("Access denied");
            warn!(
                account_id = viewer.account_id,
                action,
                status = err.status_code().as_u16(),
                "subscriptions: non-member viewer rejected"
            );
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::{
        entities::{accounts::AccountEntity, plans::PlanEntity, subscriptions::SubscriptionEntity},
        repositories::{plans::MockPlanRepository, subscriptions::MockSubscriptionRepository},
    };

    fn sample_trainer(id: i64) -> AccountEntity {
        let now = Utc::now();
        AccountEntity {
            id,
            display_name: format!("Trainer {id}"),
            email: format!("trainer{id}@example.com"),
            password_hash: "hash".to_string(),
            role: "trainer".to_string(),
            bio: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_plan(id: i64, trainer_id: i64) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id,
            title: format!("Plan {id}"),
            description: "12 week strength block".to_string(),
            price_minor: 2999,
            duration_days: 84,
            trainer_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_subscription(id: i64, member_id: i64, plan_id: i64) -> SubscriptionEntity {
        SubscriptionEntity {
            id,
            member_id,
            plan_id,
            created_at: Utc::now(),
        }
    }

    fn member_viewer(account_id: i64) -> Viewer {
        Viewer {
            account_id,
            role: Role::Member,
        }
    }

    #[tokio::test]
    async fn subscribe_returns_subscription_with_plan() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        plan_repo.expect_find_by_id().with(eq(10)).returning(|id| {
            let pair = (sample_plan(id, 3), sample_trainer(3));
            Box::pin(async move { Ok(Some(pair)) })
        });
        subscription_repo
            .expect_find_by_member_and_plan()
            .with(eq(7), eq(10))
            .returning(|_, _| Box::pin(async { Ok(None) }));
        subscription_repo
            .expect_insert()
            .withf(|entity| entity.member_id == 7 && entity.plan_id == 10)
            .returning(|entity| {
                let subscription = sample_subscription(1, entity.member_id, entity.plan_id);
                Box::pin(async move { Ok(UniqueInsert::Inserted(subscription)) })
            });

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(plan_repo));

        let dto = usecase.subscribe(member_viewer(7), 10).await.unwrap();

        assert_eq!(dto.plan.id, 10);
    }

    #[tokio::test]
    async fn subscribe_rejects_missing_plan() {
        let subscription_repo = MockSubscriptionRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        plan_repo
            .expect_find_by_id()
            .with(eq(99))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(plan_repo));

        let err = usecase.subscribe(member_viewer(7), 99).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_subscription_is_rejected_by_precheck() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        plan_repo.expect_find_by_id().with(eq(10)).returning(|id| {
            let pair = (sample_plan(id, 3), sample_trainer(3));
            Box::pin(async move { Ok(Some(pair)) })
        });
        subscription_repo
            .expect_find_by_member_and_plan()
            .with(eq(7), eq(10))
            .returning(|member_id, plan_id| {
                let subscription = sample_subscription(1, member_id, plan_id);
                Box::pin(async move { Ok(Some(subscription)) })
            });

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(plan_repo));

        let err = usecase.subscribe(member_viewer(7), 10).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn duplicate_subscription_is_rejected_by_constraint() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        plan_repo.expect_find_by_id().with(eq(10)).returning(|id| {
            let pair = (sample_plan(id, 3), sample_trainer(3));
            Box::pin(async move { Ok(Some(pair)) })
        });
        subscription_repo
            .expect_find_by_member_and_plan()
            .with(eq(7), eq(10))
            .returning(|_, _| Box::pin(async { Ok(None) }));
        subscription_repo
            .expect_insert()
            .withf(|entity| entity.member_id == 7 && entity.plan_id == 10)
            .returning(|_| Box::pin(async { Ok(UniqueInsert::AlreadyExists) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(plan_repo));

        let err = usecase.subscribe(member_viewer(7), 10).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn check_reports_missing_subscription() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let plan_repo = MockPlanRepository::new();

        subscription_repo
            .expect_find_by_member_and_plan()
            .with(eq(7), eq(10))
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(plan_repo));

        let status = usecase.check(member_viewer(7), 10).await.unwrap();

        assert!(!status.is_subscribed);
    }

    #[tokio::test]
    async fn check_reports_existing_subscription() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let plan_repo = MockPlanRepository::new();

        subscription_repo
            .expect_find_by_member_and_plan()
            .with(eq(7), eq(10))
            .returning(|member_id, plan_id| {
                let subscription = sample_subscription(1, member_id, plan_id);
                Box::pin(async move { Ok(Some(subscription)) })
            });

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(plan_repo));

        let status = usecase.check(member_viewer(7), 10).await.unwrap();

        assert!(status.is_subscribed);
    }

    #[tokio::test]
    async fn trainer_viewer_cannot_subscribe() {
        let subscription_repo = MockSubscriptionRepository::new();
        let plan_repo = MockPlanRepository::new();

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(plan_repo));

        let viewer = Viewer {
            account_id: 3,
            role: Role::Trainer,
        };
        let err = usecase.subscribe(viewer, 10).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}
