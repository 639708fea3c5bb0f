use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Provenance tag for a feed entry: how the plan got into the viewer's feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeedSource {
    #[serde(rename = "followed_trainer")]
    FollowedTrainer,
    #[serde(rename = "purchased")]
    Purchased,
}

impl FeedSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSource::FollowedTrainer => "followed_trainer",
            FeedSource::Purchased => "purchased",
        }
    }
}

impl Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_wire_tags() {
        let followed = serde_json::to_value(FeedSource::FollowedTrainer).unwrap();
        let purchased = serde_json::to_value(FeedSource::Purchased).unwrap();

        assert_eq!(followed, serde_json::json!("followed_trainer"));
        assert_eq!(purchased, serde_json::json!("purchased"));
    }
}
