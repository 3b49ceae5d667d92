//! Profile service
//!
//! Reads and edits of the user profile document, including the golf section
//! and the recent-rounds scorecard.

use tracing::{info, instrument};
use validator::Validate;

use birdie_core::{GolfInfo, GolfRound, UserId, UserProfile};

use crate::dto::{RecordRoundRequest, UpdateDescriptionRequest, UpdateDisplayNameRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch a profile
    #[instrument(skip(self))]
    pub async fn get(&self, user: &UserId) -> ServiceResult<UserProfile> {
        self.ctx
            .profile_repo()
            .find(user)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", user.to_string()))
    }

    /// Create or replace a profile document
    #[instrument(skip(self, profile), fields(user = %profile.id))]
    pub async fn ensure(&self, profile: &UserProfile) -> ServiceResult<()> {
        self.ctx.profile_repo().upsert(profile).await?;
        Ok(())
    }

    /// Update the display name
    #[instrument(skip(self, request))]
    pub async fn update_display_name(
        &self,
        user: &UserId,
        request: UpdateDisplayNameRequest,
    ) -> ServiceResult<()> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        self.ctx
            .profile_repo()
            .update_display_name(user, request.name.trim())
            .await?;
        info!(user = %user, "Display name updated");
        Ok(())
    }

    /// Update the free-form description
    #[instrument(skip(self, request))]
    pub async fn update_description(
        &self,
        user: &UserId,
        request: UpdateDescriptionRequest,
    ) -> ServiceResult<()> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        self.ctx
            .profile_repo()
            .update_description(user, &request.description)
            .await?;
        Ok(())
    }

    /// Replace the golf section wholesale
    #[instrument(skip(self, info))]
    pub async fn update_golf_info(&self, user: &UserId, info: GolfInfo) -> ServiceResult<()> {
        for round in &info.recent_rounds {
            round.validate()?;
        }
        self.ctx.profile_repo().update_golf_info(user, info).await?;
        info!(user = %user, "Golf info updated");
        Ok(())
    }

    /// Record a played round, appending it to the recent-rounds list
    #[instrument(skip(self, request))]
    pub async fn record_round(
        &self,
        user: &UserId,
        request: RecordRoundRequest,
    ) -> ServiceResult<()> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        let round = GolfRound {
            date: request.date,
            score: request.score,
        };
        round.validate()?;

        let profile = self.get(user).await?;
        let mut rounds = profile
            .golf
            .map(|g| g.recent_rounds)
            .unwrap_or_default();
        rounds.push(round);
        self.ctx.profile_repo().replace_rounds(user, rounds).await?;
        Ok(())
    }

    /// Update the avatar URL
    #[instrument(skip(self))]
    pub async fn set_avatar(&self, user: &UserId, url: &str) -> ServiceResult<()> {
        self.ctx.profile_repo().set_photo_url(user, url).await?;
        Ok(())
    }
}
