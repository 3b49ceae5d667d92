//! Channel-preview user cache
//!
//! Rendering the chat list needs the counterpart's display name and avatar
//! for every channel row. Profiles are fetched through the profile port and
//! held in a bounded cache with per-entry TTL, so redraws do not refetch and
//! stale entries age out instead of living for the whole process.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use birdie_common::PreviewCacheConfig;
use birdie_core::{ProfileRepository, UserId, UserProfile};

use crate::error::ChatResult;
use crate::provider::ChannelSummary;

struct Slot {
    profile: UserProfile,
    inserted_at: Instant,
}

struct CacheState {
    slots: HashMap<UserId, Slot>,
    /// Insertion order, oldest first, for capacity eviction
    order: Vec<UserId>,
}

/// Bounded, TTL-expiring cache of counterpart profiles
pub struct ChannelPreviewCache {
    state: Mutex<CacheState>,
    capacity: usize,
    ttl: Duration,
}

impl ChannelPreviewCache {
    pub fn new(config: &PreviewCacheConfig) -> Self {
        Self {
            state: Mutex::new(CacheState {
                slots: HashMap::new(),
                order: Vec::new(),
            }),
            capacity: config.capacity.max(1),
            ttl: Duration::from_secs(config.ttl_secs),
        }
    }

    /// Look up a cached profile, dropping it when past its TTL
    pub fn get(&self, user: &UserId) -> Option<UserProfile> {
        let mut state = self.state.lock();
        match state.slots.get(user) {
            Some(slot) if slot.inserted_at.elapsed() < self.ttl => Some(slot.profile.clone()),
            Some(_) => {
                state.slots.remove(user);
                state.order.retain(|id| id != user);
                None
            }
            None => None,
        }
    }

    /// Insert a profile, evicting the oldest entry at capacity
    pub fn insert(&self, profile: UserProfile) {
        let mut state = self.state.lock();
        let user = profile.id.clone();

        if !state.slots.contains_key(&user) && state.slots.len() >= self.capacity {
            let evicted = state.order.remove(0);
            state.slots.remove(&evicted);
            debug!(user = %evicted, "Preview cache entry evicted");
        }

        state.order.retain(|id| id != &user);
        state.order.push(user.clone());
        state.slots.insert(
            user,
            Slot {
                profile,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.state.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().slots.is_empty()
    }

    /// Resolve the counterpart profile for a channel row, through the cache.
    ///
    /// Returns `None` when the channel has no counterpart (a self-channel)
    /// or the counterpart has no profile document.
    pub async fn counterpart_profile(
        &self,
        repo: &dyn ProfileRepository,
        channel: &ChannelSummary,
        me: &UserId,
    ) -> ChatResult<Option<UserProfile>> {
        let Some(counterpart) = channel.counterpart(me) else {
            return Ok(None);
        };

        if let Some(profile) = self.get(counterpart) {
            return Ok(Some(profile));
        }

        let Some(profile) = repo.find(counterpart).await? else {
            return Ok(None);
        };
        self.insert(profile.clone());
        Ok(Some(profile))
    }
}

impl std::fmt::Debug for ChannelPreviewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelPreviewCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .finish()
    }
}
