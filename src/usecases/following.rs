use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    domain::{
        entities::follows::InsertFollowEntity,
        repositories::{accounts::AccountRepository, follows::FollowRepository},
        value_objects::{
            accounts::{TrainerSnippetDto, Viewer},
            enums::roles::Role,
            unique_insert::UniqueInsert,
        },
    },
    usecases::error::{UseCaseError, UseCaseResult},
};

pub struct FollowingUseCase<F, A>
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    follow_repo: Arc<F>,
    account_repo: Arc<A>,
}

impl<F, A> FollowingUseCase<F, A>
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    pub fn new(follow_repo: Arc<F>, account_repo: Arc<A>) -> Self {
        Self {
            follow_repo,
            account_repo,
        }
    }

    /// Follows a trainer. The uniqueness pre-check and the database constraint
    /// both map to the same conflict so concurrent requests cannot slip a
    /// duplicate through.
    pub async fn follow_trainer(
        &self,
        viewer: Viewer,
        trainer_id: i64,
    ) -> UseCaseResult<Vec<TrainerSnippetDto>> {
        self.ensure_member(&viewer, "follow")?;
        let member_id = viewer.account_id;
        info!(member_id, trainer_id, "following: follow requested");

        let trainer = self
            .account_repo
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(member_id, trainer_id, db_error = ?err, "following: failed to load trainer");
                UseCaseError::Internal(err)
            })?;

        match trainer {
            Some(account) if account.role == Role::Trainer.as_str() => {}
            _ => {
                let err = UseCaseError::NotFound("Trainer");
                warn!(
                    member_id,
                    trainer_id,
                    status = err.status_code().as_u16(),
                    "following: target is not a trainer"
                );
                return Err(err);
            }
        }

        if self
            .follow_repo
            .exists(member_id, trainer_id)
            .await
            .map_err(|err| {
                error!(member_id, trainer_id, db_error = ?err, "following: failed to check follow");
                UseCaseError::Internal(err)
            })?
        {
            let err = UseCaseError::AlreadyFollowing;
            warn!(
                member_id,
                trainer_id,
                status = err.status_code().as_u16(),
                "following: duplicate follow rejected"
            );
            return Err(err);
        }

        let entity = InsertFollowEntity {
            member_id,
            trainer_id,
        };
        match self.follow_repo.insert(entity).await.map_err(|err| {
            error!(member_id, trainer_id, db_error = ?err, "following: failed to insert follow");
            UseCaseError::Internal(err)
        })? {
            UniqueInsert::Inserted(_) => {
                info!(member_id, trainer_id, "following: follow created");
            }
            UniqueInsert::AlreadyExists => {
                let err = UseCaseError::AlreadyFollowing;
                warn!(
                    member_id,
                    trainer_id,
                    status = err.status_code().as_u16(),
                    "following: duplicate follow rejected by constraint"
                );
                return Err(err);
            }
        }

        self.followed_trainers(viewer).await
    }

    /// Removes a follow if present. Succeeds either way.
    pub async fn unfollow_trainer(
        &self,
        viewer: Viewer,
        trainer_id: i64,
    ) -> UseCaseResult<Vec<TrainerSnippetDto>> {
        self.ensure_member(&viewer, "unfollow")?;
        let member_id = viewer.account_id;
        info!(member_id, trainer_id, "following: unfollow requested");

        self.follow_repo
            .delete(member_id, trainer_id)
            .await
            .map_err(|err| {
                error!(member_id, trainer_id, db_error = ?err, "following: failed to delete follow");
                UseCaseError::Internal(err)
            })?;

        self.followed_trainers(viewer).await
    }

    pub async fn followed_trainers(&self, viewer: Viewer) -> UseCaseResult<Vec<TrainerSnippetDto>> {
        self.ensure_member(&viewer, "list follows")?;
        let member_id = viewer.account_id;

        let trainers = self
            .follow_repo
            .list_followed_trainers(member_id)
            .await
            .map_err(|err| {
                error!(member_id, db_error = ?err, "following: failed to list followed trainers");
                UseCaseError::Internal(err)
            })?;

        Ok(trainers.into_iter().map(TrainerSnippetDto::from).collect())
    }

    fn ensure_member(&self, viewer: &Viewer, action: &str) -> UseCaseResult<()> {
        if viewer.role != Role::Member {
            let err = UseCaseError::Forbidden("Access denied");
            warn!(
                account_id = viewer.account_id,
                action,
                status = err.status_code().as_u16(),
                "following: non-member viewer rejected"
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
        entities::{accounts::AccountEntity, follows::FollowEntity},
        repositories::{accounts::MockAccountRepository, follows::MockFollowRepository},
    };

    fn sample_account(id: i64, role: &str) -> AccountEntity {
        let now = Utc::now();
        AccountEntity {
            id,
            display_name: format!("Account {id}"),
            email: format!("account{id}@example.com"),
            password_hash: "hash".to_string(),
            role: role.to_string(),
            bio: "coach".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_follow(member_id: i64, trainer_id: i64) -> FollowEntity {
        FollowEntity {
            member_id,
            trainer_id,
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
    async fn follow_returns_updated_trainer_list() {
        let mut follow_repo = MockFollowRepository::new();
        let mut account_repo = MockAccountRepository::new();

        account_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|id| {
                let account = sample_account(id, "trainer");
                Box::pin(async move { Ok(Some(account)) })
            });
        follow_repo
            .expect_exists()
            .with(eq(7), eq(3))
            .returning(|_, _| Box::pin(async { Ok(false) }));
        follow_repo
            .expect_insert()
            .withf(|entity| entity.member_id == 7 && entity.trainer_id == 3)
            .returning(|entity| {
                let follow = sample_follow(entity.member_id, entity.trainer_id);
                Box::pin(async move { Ok(UniqueInsert::Inserted(follow)) })
            });
        follow_repo
            .expect_list_followed_trainers()
            .with(eq(7))
            .returning(|_| Box::pin(async { Ok(vec![sample_account(3, "trainer")]) }));

        let usecase = FollowingUseCase::new(Arc::new(follow_repo), Arc::new(account_repo));

        let trainers = usecase.follow_trainer(member_viewer(7), 3).await.unwrap();

        assert_eq!(trainers.len(), 1);
        assert_eq!(trainers[0].id, 3);
    }

    #[tokio::test]
    async fn follow_rejects_missing_trainer() {
        let follow_repo = MockFollowRepository::new();
        let mut account_repo = MockAccountRepository::new();

        account_repo
            .expect_find_by_id()
            .with(eq(99))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = FollowingUseCase::new(Arc::new(follow_repo), Arc::new(account_repo));

        let err = usecase
            .follow_trainer(member_viewer(7), 99)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn follow_rejects_member_target() {
        let follow_repo = MockFollowRepository::new();
        let mut account_repo = MockAccountRepository::new();

        account_repo
            .expect_find_by_id()
            .with(eq(8))
            .returning(|id| {
                let account = sample_account(id, "member");
                Box::pin(async move { Ok(Some(account)) })
            });

        let usecase = FollowingUseCase::new(Arc::new(follow_repo), Arc::new(account_repo));

        let err = usecase
            .follow_trainer(member_viewer(7), 8)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_follow_is_rejected_by_precheck() {
        let mut follow_repo = MockFollowRepository::new();
        let mut account_repo = MockAccountRepository::new();

        account_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|id| {
                let account = sample_account(id, "trainer");
                Box::pin(async move { Ok(Some(account)) })
            });
        follow_repo
            .expect_exists()
            .with(eq(7), eq(3))
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = FollowingUseCase::new(Arc::new(follow_repo), Arc::new(account_repo));

        let err = usecase
            .follow_trainer(member_viewer(7), 3)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn duplicate_follow_is_rejected_by_constraint() {
        let mut follow_repo = MockFollowRepository::new();
        let mut account_repo = MockAccountRepository::new();

        account_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|id| {
                let account = sample_account(id, "trainer");
                Box::pin(async move { Ok(Some(account)) })
            });
        follow_repo
            .expect_exists()
            .with(eq(7), eq(3))
            .returning(|_, _| Box::pin(async { Ok(false) }));
        follow_repo
            .expect_insert()
            .withf(|entity| entity.member_id == 7 && entity.trainer_id == 3)
            .returning(|_| Box::pin(async { Ok(UniqueInsert::AlreadyExists) }));

        let usecase = FollowingUseCase::new(Arc::new(follow_repo), Arc::new(account_repo));

        let err = usecase
            .follow_trainer(member_viewer(7), 3)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unfollow_succeeds_without_existing_follow() {
        let mut follow_repo = MockFollowRepository::new();
        let account_repo = MockAccountRepository::new();

        follow_repo
            .expect_delete()
            .with(eq(7), eq(3))
            .returning(|_, _| Box::pin(async { Ok(()) }));
        follow_repo
            .expect_list_followed_trainers()
            .with(eq(7))
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));

        let usecase = FollowingUseCase::new(Arc::new(follow_repo), Arc::new(account_repo));

        let trainers = usecase.unfollow_trainer(member_viewer(7), 3).await.unwrap();

        assert!(trainers.is_empty());
    }

    #[tokio::test]
    async fn trainer_viewer_cannot_follow() {
        let follow_repo = MockFollowRepository::new();
        let account_repo = MockAccountRepository::new();

        let usecase = FollowingUseCase::new(Arc::new(follow_repo), Arc::new(account_repo));

        let viewer = Viewer {
            account_id: 3,
            role: Role::Trainer,
        };
        let err = usecase.follow_trainer(viewer, 4).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}
