use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::{
            accounts::Viewer,
            enums::roles::Role,
            plans::{AddPlanModel, EditPlanModel, PlanDetailDto, PlanDto, PlanWithTrainerDto},
        },
    },
    usecases::{
        error::{UseCaseError, UseCaseResult},
        plan_access::PlanAccess,
    },
};

pub struct PlanUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    plan_access: Arc<PlanAccess<S>>,
}

impl<P, S> PlanUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>, plan_access: Arc<PlanAccess<S>>) -> Self {
        Self {
            plan_repo,
            plan_access,
        }
    }

    /// Marketplace listing. Open to everyone, previews only.
    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanWithTrainerDto>> {
        let plans = self.plan_repo.list_all().await.map_err(|err| {
            error!(db_error = ?err, "plans: failed to list plans");
            UseCaseError::Internal(err)
        })?;

        Ok(plans
            .into_iter()
            .map(|(plan, trainer)| PlanWithTrainerDto::from_entities(plan, trainer))
            .collect())
    }

    /// Single plan view. The description is included only when the visibility
    /// gate passes for this viewer.
    pub async fn plan_detail(
        &self,
        viewer: Option<Viewer>,
        plan_id: i64,
    ) -> UseCaseResult<PlanDetailDto> {
        let (plan, trainer) = match self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
            error!(plan_id, db_error = ?err, "plans: failed to load plan");
            UseCaseError::Internal(err)
        })? {
            Some(pair) => pair,
            None => {
                let err = UseCaseError::NotFound("Plan");
                warn!(plan_id, status = err.status_code().as_u16(), "plans: plan not found");
                return Err(err);
            }
        };

        let can_view_full_details = self
            .plan_access
            .can_view_full_details(viewer, plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to evaluate visibility");
                UseCaseError::Internal(err)
            })?;

        Ok(PlanDetailDto::from_entities(
            plan,
            trainer,
            can_view_full_details,
        ))
    }

    pub async fn create_plan(&self, viewer: Viewer, model: AddPlanModel) -> UseCaseResult<PlanDto> {
        self.ensure_trainer(&viewer, "create plan")?;
        let trainer_id = viewer.account_id;
        info!(trainer_id, "plans: create requested");

        if model.title.trim().is_empty() || model.description.trim().is_empty() {
            return Err(self.invalid_input(trainer_id, "All fields are required"));
        }
        if model.price_minor < 0 {
            return Err(self.invalid_input(trainer_id, "Price must not be negative"));
        }
        if model.duration_days < 1 {
            return Err(self.invalid_input(trainer_id, "Duration must be at least one day"));
        }

        let plan = self
            .plan_repo
            .create(model.to_entity(trainer_id))
            .await
            .map_err(|err| {
                error!(trainer_id, db_error = ?err, "plans: failed to create plan");
                UseCaseError::Internal(err)
            })?;

        info!(trainer_id, plan_id = plan.id, "plans: plan created");
        Ok(PlanDto::from(plan))
    }

    pub async fn update_plan(
        &self,
        viewer: Viewer,
        plan_id: i64,
        model: EditPlanModel,
    ) -> UseCaseResult<PlanDto> {
        self.ensure_trainer(&viewer, "update plan")?;
        let trainer_id = viewer.account_id;
        info!(trainer_id, plan_id, "plans: update requested");

        self.ensure_owned_plan(trainer_id, plan_id, "You can only edit your own plans")
            .await?;

        if let Some(title) = &model.title {
            if title.trim().is_empty() {
                return Err(self.invalid_input(trainer_id, "Title must not be empty"));
            }
        }
        if let Some(description) = &model.description {
            if description.trim().is_empty() {
                return Err(self.invalid_input(trainer_id, "Description must not be empty"));
            }
        }
        if let Some(price_minor) = model.price_minor {
            if price_minor < 0 {
                return Err(self.invalid_input(trainer_id, "Price must not be negative"));
            }
        }
        if let Some(duration_days) = model.duration_days {
            if duration_days < 1 {
                return Err(self.invalid_input(trainer_id, "Duration must be at least one day"));
            }
        }

        let plan = self
            .plan_repo
            .update(plan_id, model.to_entity())
            .await
            .map_err(|err| {
                error!(trainer_id, plan_id, db_error = ?err, "plans: failed to update plan");
                UseCaseError::Internal(err)
            })?;

        info!(trainer_id, plan_id, "plans: plan updated");
        Ok(PlanDto::from(plan))
    }

    pub async fn delete_plan(&self, viewer: Viewer, plan_id: i64) -> UseCaseResult<()> {
        self.ensure_trainer(&viewer, "delete plan")?;
        let trainer_id = viewer.account_id;
        info!(trainer_id, plan_id, "plans: delete requested");

        self.ensure_owned_plan(trainer_id, plan_id, "You can only delete your own plans")
            .await?;

        self.plan_repo.delete(plan_id).await.map_err(|err| {
            error!(trainer_id, plan_id, db_error = ?err, "plans: failed to delete plan");
            UseCaseError::Internal(err)
        })?;

        info!(trainer_id, plan_id, "plans: plan deleted");
        Ok(())
    }

    pub async fn my_plans(&self, viewer: Viewer) -> UseCaseResult<Vec<PlanDto>> {
        self.ensure_trainer(&viewer, "list own plans")?;
        let trainer_id = viewer.account_id;

        let plans = self
            .plan_repo
            .list_by_trainer(trainer_id)
            .await
            .map_err(|err| {
                error!(trainer_id, db_error = ?err, "plans: failed to list own plans");
                UseCaseError::Internal(err)
            })?;

        Ok(plans.into_iter().map(PlanDto::from).collect())
    }

    /// Existence is checked before ownership so missing plans stay a 404.
    async fn ensure_owned_plan(
        &self,
        trainer_id: i64,
        plan_id: i64,
        denial: &'static str,
    ) -> UseCaseResult<()> {
        let (plan, _trainer) = match self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
            error!(trainer_id, plan_id, db_error = ?err, "plans: failed to load plan");
            UseCaseError::Internal(err)
        })? {
            Some(pair) => pair,
            None => {
                let err = UseCaseError::NotFound("Plan");
                warn!(
                    trainer_id,
                    plan_id,
                    status = err.status_code().as_u16(),
                    "plans: plan not found"
                );
                return Err(err);
            }
        };

        if plan.trainer_id != trainer_id {
            let err = UseCaseError::Forbidden(denial);
            warn!(
                trainer_id,
                plan_id,
                owner_id = plan.trainer_id,
                status = err.status_code().as_u16(),
                "plans: ownership check failed"
            );
            return Err(err);
        }

        Ok(())
    }

    fn ensure_trainer(&self, viewer: &Viewer, action: &str) -> UseCaseResult<()> {
        if viewer.role != Role::Trainer {
            let err = UseCaseError::Forbidden("Access denied");
            warn!(
                account_id = viewer.account_id,
                action,
                status = err.status_code().as_u16(),
                "plans: non-trainer viewer rejected"
            );
            return Err(err);
        }
        Ok(())
    }

    fn invalid_input(&self, trainer_id: i64, message: &str) -> UseCaseError {
        let err = UseCaseError::InvalidInput(message.to_string());
        warn!(
            trainer_id,
            status = err.status_code().as_u16(),
            "plans: invalid input: {message}"
        );
        err
    }
}
