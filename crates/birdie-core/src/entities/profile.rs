//! User profile entity and golf stats

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::UserId;

/// A single recorded round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolfRound {
    pub date: NaiveDate,
    pub score: u32,
}

impl GolfRound {
    /// Validate a round before it is saved.
    ///
    /// 18 strokes is the floor a scorecard can physically show; anything
    /// below is a data-entry error.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.score < 18 {
            return Err(DomainError::InvalidRound(format!(
                "score {} is below the minimum of 18",
                self.score
            )));
        }
        Ok(())
    }
}

/// Golf profile section shown on the profile page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GolfInfo {
    pub down_to_play: Option<bool>,
    pub best_score: Option<u32>,
    pub average_score: Option<f64>,
    pub description: String,
    pub number_of_eagles: Option<u32>,
    pub hole_in_one: Option<bool>,
    pub favorite_golfer: String,
    pub equipment: String,
    pub recent_rounds: Vec<GolfRound>,
}

impl GolfInfo {
    /// Best (lowest) score among the recorded recent rounds, if any
    pub fn best_recent_score(&self) -> Option<u32> {
        self.recent_rounds.iter().map(|r| r.score).min()
    }
}

/// User profile document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub golf: Option<GolfInfo>,
}

impl UserProfile {
    /// Create a profile with no golf section yet
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            photo_url: None,
            golf: None,
        }
    }

    /// Display name, falling back the way the feed renders missing names
    pub fn display_name_or_anonymous(&self) -> &str {
        if self.display_name.trim().is_empty() {
            "Anonymous"
        } else {
            &self.display_name
        }
    }
}
