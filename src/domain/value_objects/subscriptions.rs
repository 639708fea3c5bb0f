use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{plans::PlanEntity, subscriptions::SubscriptionEntity},
    value_objects::plans::PlanDto,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionDto {
    pub id: i64,
    pub plan: PlanDto,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionDto {
    pub fn from_entities(subscription: SubscriptionEntity, plan: PlanEntity) -> Self {
        Self {
            id: subscription.id,
            plan: PlanDto::from(plan),
            created_at: subscription.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionStatusDto {
    #[serde(rename = "isSubscribed")]
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeModel {
    #[serde(rename = "planId")]
    pub plan_id: i64,
}
