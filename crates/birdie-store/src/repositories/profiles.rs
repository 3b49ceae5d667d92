//! Profile repository implementation

use async_trait::async_trait;
use tracing::instrument;

use birdie_core::{
    GolfInfo, GolfRound, ProfileRepository, StoreResult, UserId, UserProfile,
};

use crate::store::MemoryStore;

/// In-memory implementation of [`ProfileRepository`]
#[derive(Debug, Clone)]
pub struct MemProfileRepository {
    store: MemoryStore,
}

impl MemProfileRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for MemProfileRepository {
    #[instrument(skip(self))]
    async fn find(&self, user: &UserId) -> StoreResult<Option<UserProfile>> {
        Ok(self.store.find_profile(user))
    }

    #[instrument(skip(self, profile))]
    async fn upsert(&self, profile: &UserProfile) -> StoreResult<()> {
        self.store.upsert_profile(profile.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_display_name(&self, user: &UserId, name: &str) -> StoreResult<()> {
        self.store
            .update_profile(user, |p| p.display_name = name.to_string())
    }

    #[instrument(skip(self))]
    async fn update_description(&self, user: &UserId, description: &str) -> StoreResult<()> {
        self.store.update_profile(user, |p| {
            p.golf.get_or_insert_with(GolfInfo::default).description = description.to_string();
        })
    }

    #[instrument(skip(self, info))]
    async fn update_golf_info(&self, user: &UserId, info: GolfInfo) -> StoreResult<()> {
        self.store.update_profile(user, |p| p.golf = Some(info))
    }

    #[instrument(skip(self, rounds))]
    async fn replace_rounds(&self, user: &UserId, rounds: Vec<GolfRound>) -> StoreResult<()> {
        self.store.update_profile(user, |p| {
            p.golf.get_or_insert_with(GolfInfo::default).recent_rounds = rounds;
        })
    }

    #[instrument(skip(self))]
    async fn set_photo_url(&self, user: &UserId, url: &str) -> StoreResult<()> {
        self.store
            .update_profile(user, |p| p.photo_url = Some(url.to_string()))
    }
}
