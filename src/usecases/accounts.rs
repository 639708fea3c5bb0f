use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    domain::{
        entities::accounts::AccountEntity,
        repositories::{
            accounts::AccountRepository, follows::FollowRepository, plans::PlanRepository,
        },
        value_objects::{
            accounts::{AccountDto, EditAccountModel, TrainerProfileDto, TrainerSnippetDto, Viewer},
            enums::roles::Role,
            plans::PlanDto,
        },
    },
    usecases::{
        auth::CredentialHasher,
        error::{UseCaseError, UseCaseResult},
    },
};

pub struct AccountUseCase<A, P, F, H>
where
    A: AccountRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    F: FollowRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    plan_repo: Arc<P>,
    follow_repo: Arc<F>,
    credential_hasher: Arc<H>,
}

impl<A, P, F, H> AccountUseCase<A, P, F, H>
where
    A: AccountRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    F: FollowRepository + Send + Sync + 'static,
    H: CredentialHasher + Send + Sync + 'static,
{
    pub fn new(
        account_repo: Arc<A>,
        plan_repo: Arc<P>,
        follow_repo: Arc<F>,
        credential_hasher: Arc<H>,
    ) -> Self {
        Self {
            account_repo,
            plan_repo,
            follow_repo,
            credential_hasher,
        }
    }

    pub async fn profile(&self, viewer: Viewer) -> UseCaseResult<AccountDto> {
        let account = self.load_account(viewer.account_id).await?;
        Ok(AccountDto::from(account))
    }

    pub async fn update_profile(
        &self,
        viewer: Viewer,
        model: EditAccountModel,
    ) -> UseCaseResult<AccountDto> {
        let account_id = viewer.account_id;
        info!(account_id, "accounts: profile update requested");

        if let Some(display_name) = &model.display_name {
            if display_name.trim().is_empty() {
                return Err(UseCaseError::InvalidInput(
                    "Display name must not be empty".to_string(),
                ));
            }
        }
        if let Some(password) = &model.password {
            if password.len() < 8 {
                return Err(UseCaseError::InvalidInput(
                    "Password must be at least 8 characters".to_string(),
                ));
            }
        }

        self.load_account(account_id).await?;

        let password_hash = match &model.password {
            Some(password) => Some(self.credential_hasher.hash_password(password).map_err(
                |err| {
                    error!(account_id, hash_error = ?err, "accounts: failed to hash password");
                    UseCaseError::Internal(err)
                },
            )?),
            None => None,
        };

        let updated = self
            .account_repo
            .update(account_id, model.to_entity(password_hash))
            .await
            .map_err(|err| {
                error!(account_id, db_error = ?err, "accounts: failed to update profile");
                UseCaseError::Internal(err)
            })?;

        info!(account_id, "accounts: profile updated");
        Ok(AccountDto::from(updated))
    }

    /// Public trainer page. `is_following` is only resolved for signed-in
    /// members, everyone else sees false.
    pub async fn trainer_profile(
        &self,
        viewer: Option<Viewer>,
        trainer_id: i64,
    ) -> UseCaseResult<TrainerProfileDto> {
        let trainer = match self
            .account_repo
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(trainer_id, db_error = ?err, "accounts: failed to load trainer");
                UseCaseError::Internal(err)
            })? {
            Some(account) if account.role == Role::Trainer.as_str() => account,
            _ => {
                let err = UseCaseError::NotFound("Trainer");
                warn!(
                    trainer_id,
                    status = err.status_code().as_u16(),
                    "accounts: trainer not found"
                );
                return Err(err);
            }
        };

        let plans = self
            .plan_repo
            .list_by_trainer(trainer_id)
            .await
            .map_err(|err| {
                error!(trainer_id, db_error = ?err, "accounts: failed to load trainer plans");
                UseCaseError::Internal(err)
            })?;

        let is_following = match viewer {
            Some(viewer) if viewer.role == Role::Member => self
                .follow_repo
                .exists(viewer.account_id, trainer_id)
                .await
                .map_err(|err| {
                    error!(
                        trainer_id,
                        member_id = viewer.account_id,
                        db_error = ?err,
                        "accounts: failed to check follow state"
                    );
                    UseCaseError::Internal(err)
                })?,
            _ => false,
        };

        Ok(TrainerProfileDto {
            trainer: TrainerSnippetDto::from(trainer),
            plans: plans.into_iter().map(PlanDto::from).collect(),
            is_following,
        })
    }

    async fn load_account(&self, account_id: i64) -> UseCaseResult<AccountEntity> {
        match self.account_repo.find_by_id(account_id).await.map_err(|err| {
            error!(account_id, db_error = ?err, "accounts: failed to load account");
            UseCaseError::Internal(err)
        })? {
            Some(account) => Ok(account),
            None => {
                let err = UseCaseError::NotFound("Account");
                warn!(
                    account_id,
                    status = err.status_code().as_u16(),
                    "accounts: account missing for valid token"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::{
        entities::{accounts::AccountEntity, plans::PlanEntity},
        repositories::{
            accounts::MockAccountRepository, follows::MockFollowRepository,
            plans::MockPlanRepository,
        },
        value_objects::enums::roles::Role,
    };
    use crate::usecases::auth::MockCredentialHasher;

    fn sample_account(id: i64, role: &str) -> AccountEntity {
        let now = Utc::now();
        AccountEntity {
            id,
            display_name: format!("Account {id}"),
            email: format!("account{id}@example.com"),
            password_hash: "hash".to_string(),
            role: role.to_string(),
            bio: "bio".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_plan(id: i64, trainer_id: i64) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id,
            title: format!("Plan {id}"),
            description: "desc".to_string(),
            price_minor: 1000,
            duration_days: 30,
            trainer_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase_with(
        account_repo: MockAccountRepository,
        plan_repo: MockPlanRepository,
        follow_repo: MockFollowRepository,
        hasher: MockCredentialHasher,
    ) -> AccountUseCase<MockAccountRepository, MockPlanRepository, MockFollowRepository, MockCredentialHasher>
    {
        AccountUseCase::new(
            Arc::new(account_repo),
            Arc::new(plan_repo),
            Arc::new(follow_repo),
            Arc::new(hasher),
        )
    }

    #[tokio::test]
    async fn profile_returns_own_account() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_id()
            .with(eq(7))
            .returning(|id| {
                let account = sample_account(id, "member");
                Box::pin(async move { Ok(Some(account)) })
            });

        let usecase = usecase_with(
            account_repo,
            MockPlanRepository::new(),
            MockFollowRepository::new(),
            MockCredentialHasher::new(),
        );

        let viewer = Viewer {
            account_id: 7,
            role: Role::Member,
        };
        let profile = usecase.profile(viewer).await.unwrap();

        assert_eq!(profile.id, 7);
        assert_eq!(profile.email, "account7@example.com");
    }

    #[tokio::test]
    async fn update_profile_changes_display_name_without_touching_password() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_id()
            .with(eq(7))
            .returning(|id| {
                let account = sample_account(id, "member");
                Box::pin(async move { Ok(Some(account)) })
            });
        account_repo
            .expect_update()
            .withf(|id, entity| {
                *id == 7
                    && entity.display_name.as_deref() == Some("New Name")
                    && entity.password_hash.is_none()
            })
            .returning(|id, entity| {
                let mut account = sample_account(id, "member");
                if let Some(display_name) = entity.display_name.clone() {
                    account.display_name = display_name;
                }
                Box::pin(async move { Ok(account) })
            });

        let usecase = usecase_with(
            account_repo,
            MockPlanRepository::new(),
            MockFollowRepository::new(),
            MockCredentialHasher::new(),
        );

        let viewer = Viewer {
            account_id: 7,
            role: Role::Member,
        };
        let model = EditAccountModel {
            display_name: Some("New Name".to_string()),
            bio: None,
            password: None,
        };
        let profile = usecase.update_profile(viewer, model).await.unwrap();

        assert_eq!(profile.display_name, "New Name");
    }

    #[tokio::test]
    async fn update_profile_hashes_replacement_password() {
        let mut account_repo = MockAccountRepository::new();
        let mut hasher = MockCredentialHasher::new();

        account_repo
            .expect_find_by_id()
            .with(eq(7))
            .returning(|id| {
                let account = sample_account(id, "member");
                Box::pin(async move { Ok(Some(account)) })
            });
        hasher
            .expect_hash_password()
            .with(eq("newpassword"))
            .returning(|_| Ok("new-hash".to_string()));
        account_repo
            .expect_update()
            .withf(|id, entity| *id == 7 && entity.password_hash.as_deref() == Some("new-hash"))
            .returning(|id, _| {
                let account = sample_account(id, "member");
                Box::pin(async move { Ok(account) })
            });

        let usecase = usecase_with(
            account_repo,
            MockPlanRepository::new(),
            MockFollowRepository::new(),
            hasher,
        );

        let viewer = Viewer {
            account_id: 7,
            role: Role::Member,
        };
        let model = EditAccountModel {
            display_name: None,
            bio: None,
            password: Some("newpassword".to_string()),
        };
        usecase.update_profile(viewer, model).await.unwrap();
    }

    #[tokio::test]
    async fn update_profile_rejects_short_password() {
        let usecase = usecase_with(
            MockAccountRepository::new(),
            MockPlanRepository::new(),
            MockFollowRepository::new(),
            MockCredentialHasher::new(),
        );

        let viewer = Viewer {
            account_id: 7,
            role: Role::Member,
        };
        let model = EditAccountModel {
            display_name: None,
            bio: None,
            password: Some("short".to_string()),
        };
        let err = usecase.update_profile(viewer, model).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn trainer_profile_includes_plans_and_follow_state() {
        let mut account_repo = MockAccountRepository::new();
        let mut plan_repo = MockPlanRepository::new();
        let mut follow_repo = MockFollowRepository::new();

        account_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|id| {
                let account = sample_account(id, "trainer");
                Box::pin(async move { Ok(Some(account)) })
            });
        plan_repo
            .expect_list_by_trainer()
            .with(eq(3))
            .returning(|trainer_id| {
                let plans = vec![sample_plan(10, trainer_id)];
                Box::pin(async move { Ok(plans) })
            });
        follow_repo
            .expect_exists()
            .with(eq(7), eq(3))
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = usecase_with(
            account_repo,
            plan_repo,
            follow_repo,
            MockCredentialHasher::new(),
        );

        let viewer = Viewer {
            account_id: 7,
            role: Role::Member,
        };
        let profile = usecase.trainer_profile(Some(viewer), 3).await.unwrap();

        assert_eq!(profile.trainer.id, 3);
        assert_eq!(profile.plans.len(), 1);
        assert!(profile.is_following);
    }

    #[tokio::test]
    async fn trainer_profile_skips_follow_state_for_anonymous_viewer() {
        let mut account_repo = MockAccountRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        account_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|id| {
                let account = sample_account(id, "trainer");
                Box::pin(async move { Ok(Some(account)) })
            });
        plan_repo
            .expect_list_by_trainer()
            .with(eq(3))
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));

        let usecase = usecase_with(
            account_repo,
            plan_repo,
            MockFollowRepository::new(),
            MockCredentialHasher::new(),
        );

        let profile = usecase.trainer_profile(None, 3).await.unwrap();

        assert!(!profile.is_following);
    }

    #[tokio::test]
    async fn trainer_profile_rejects_member_account() {
        let mut account_repo = MockAccountRepository::new();

        account_repo
            .expect_find_by_id()
            .with(eq(8))
            .returning(|id| {
                let account = sample_account(id, "member");
                Box::pin(async move { Ok(Some(account)) })
            });

        let usecase = usecase_with(
            account_repo,
            MockPlanRepository::new(),
            MockFollowRepository::new(),
            MockCredentialHasher::new(),
        );

        let err = usecase.trainer_profile(None, 8).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
