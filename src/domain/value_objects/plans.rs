use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{
        accounts::AccountEntity,
        plans::{EditPlanEntity, InsertPlanEntity, PlanEntity},
    },
    value_objects::accounts::TrainerSnippetDto,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price_minor: i32,
    pub duration_days: i32,
    pub trainer_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlanEntity> for PlanDto {
    fn from(value: PlanEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            price_minor: value.price_minor,
            duration_days: value.duration_days,
            trainer_id: value.trainer_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanWithTrainerDto {
    #[serde(flatten)]
    pub plan: PlanDto,
    pub trainer: TrainerSnippetDto,
}

impl PlanWithTrainerDto {
    pub fn from_entities(plan: PlanEntity, trainer: AccountEntity) -> Self {
        Self {
            plan: PlanDto::from(plan),
            trainer: TrainerSnippetDto::from(trainer),
        }
    }
}

/// Single-plan view. `description` is omitted unless the viewer passed the
/// visibility gate; the flag tells clients why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDetailDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub duration_days: i32,
    pub trainer: TrainerSnippetDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "canViewFullDetails")]
    pub can_view_full_details: bool,
}

impl PlanDetailDto {
    pub fn from_entities(
        plan: PlanEntity,
        trainer: AccountEntity,
        can_view_full_details: bool,
    ) -> Self {
        let description = if can_view_full_details {
            Some(plan.description)
        } else {
            None
        };

        Self {
            id: plan.id,
            title: plan.title,
            description,
            price_minor: plan.price_minor,
            duration_days: plan.duration_days,
            trainer: TrainerSnippetDto::from(trainer),
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            can_view_full_details,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPlanModel {
    pub title: String,
    pub description: String,
    pub price_minor: i32,
    pub duration_days: i32,
}

impl AddPlanModel {
    pub fn to_entity(&self, trainer_id: i64) -> InsertPlanEntity {
        InsertPlanEntity {
            title: self.title.clone(),
            description: self.description.clone(),
            price_minor: self.price_minor,
            duration_days: self.duration_days,
            trainer_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditPlanModel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_minor: Option<i32>,
    pub duration_days: Option<i32>,
}

impl EditPlanModel {
    pub fn to_entity(&self) -> EditPlanEntity {
        EditPlanEntity {
            title: self.title.clone(),
            description: self.description.clone(),
            price_minor: self.price_minor,
            duration_days: self.duration_days,
            updated_at: Some(Utc::now()),
        }
    }
}
