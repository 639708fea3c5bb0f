use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{enums::feed_sources::FeedSource, plans::PlanWithTrainerDto};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedEntryDto {
    #[serde(flatten)]
    pub plan: PlanWithTrainerDto,
    pub source: FeedSource,
    #[serde(rename = "isPurchased")]
    pub is_purchased: bool,
}

impl FeedEntryDto {
    pub fn new(plan: PlanWithTrainerDto, source: FeedSource, is_purchased: bool) -> Self {
        Self {
            plan,
            source,
            is_purchased,
        }
    }
}
