//! Post entity - a denormalized projection of a user post for feed display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DomainError;
use crate::value_objects::{DocId, PostLocations, UserId};

/// Maximum post body length in Unicode code points
pub const MAX_POST_CODE_POINTS: usize = 180;

/// Direction of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOp {
    Like,
    Unlike,
}

/// Denormalized post summary as displayed in a feed.
///
/// `id` is the id of the record the summary was read from (aggregate feed for
/// the home timeline, per-user feed for profile pages); `locations` carries
/// both physical ids so mutations reach the mirror copy too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: DocId,
    pub author_id: UserId,
    pub author_display_name: String,
    pub author_photo_url: Option<String>,
    pub body: String,
    pub photo_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    pub liked_by: HashSet<UserId>,
    pub comment_count: u32,
    pub locations: PostLocations,
}

impl PostSummary {
    /// Validate a post body before it is written anywhere.
    ///
    /// The limit counts Unicode code points, matching the composer's input cap.
    pub fn validate_body(body: &str) -> Result<(), DomainError> {
        if body.trim().is_empty() {
            return Err(DomainError::EmptyBody);
        }
        if body.chars().count() > MAX_POST_CODE_POINTS {
            return Err(DomainError::BodyTooLong {
                max: MAX_POST_CODE_POINTS,
            });
        }
        Ok(())
    }

    /// Check whether a user has an active like on this post
    #[inline]
    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }

    /// Check whether the post has attached media
    #[inline]
    pub fn has_media(&self) -> bool {
        self.photo_url.is_some() || self.video_url.is_some()
    }

    /// Check whether the acting user is the post's author
    #[inline]
    pub fn is_authored_by(&self, user: &UserId) -> bool {
        self.author_id == *user
    }

    /// Toggle a user's like, keeping `like_count` and `liked_by` consistent.
    ///
    /// Idempotent per user: toggling twice returns the post to its original
    /// state. The count never underflows.
    pub fn toggle_like(&mut self, user: &UserId) -> LikeOp {
        if self.liked_by.remove(user) {
            self.like_count = self.like_count.saturating_sub(1);
            LikeOp::Unlike
        } else {
            self.liked_by.insert(user.clone());
            self.like_count += 1;
            LikeOp::Like
        }
    }
}
