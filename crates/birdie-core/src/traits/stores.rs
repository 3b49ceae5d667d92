//! Store ports - define the interface for data access
//!
//! The backing document database, and the object storage next to it, are
//! external managed services. The domain layer defines the shapes it needs
//! from them; the infrastructure layer provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::entities::{Comment, GolfInfo, GolfRound, LikeOp, PostSummary, UserProfile};
use crate::error::DomainError;
use crate::value_objects::{DocId, FeedScope, MediaPath, MediaKind, PageCursor, PostLocations, UserId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

/// Pagination options for feed queries
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    /// Resume after this cursor; `None` requests the first page
    pub after: Option<PageCursor>,
    /// Fixed page size
    pub limit: usize,
}

/// One fetched page of a feed, in store order (newest first)
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub items: Vec<PostSummary>,
    /// Cursor at the last item of this page; `None` for an empty page
    pub next_cursor: Option<PageCursor>,
}

/// Fields of a new post record, before the store assigns its id.
///
/// `aggregate_doc` is set on the per-user copy to link it back to the
/// aggregate mirror written just before it.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub author_id: UserId,
    pub author_display_name: String,
    pub author_photo_url: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub aggregate_doc: Option<DocId>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch one page of a feed, ordered by `created_at` descending with
    /// ties broken by store-assigned document order. Ordering is owned by
    /// the store, never recomputed by the client.
    async fn page(&self, scope: &FeedScope, query: PageQuery) -> StoreResult<FeedPage>;

    /// Find a post record by id within one scope
    async fn find(&self, scope: &FeedScope, id: &DocId) -> StoreResult<Option<PostSummary>>;

    /// Insert a new record, returning the store-assigned document id
    async fn insert(&self, scope: &FeedScope, record: PostRecord) -> StoreResult<DocId>;

    /// Record the per-user mirror id on a post's aggregate copy, completing
    /// the cross-reference written in two steps during composition
    async fn link_mirror(&self, aggregate_doc: &DocId, feed_doc: &DocId) -> StoreResult<()>;

    /// Patch the media URL onto both physical copies of a post
    async fn set_media(
        &self,
        locations: &PostLocations,
        kind: MediaKind,
        url: &str,
    ) -> StoreResult<()>;

    /// Atomically apply a like toggle to both physical copies: counter
    /// increment/decrement plus set add/remove, no client-side
    /// read-modify-write.
    async fn apply_like(
        &self,
        locations: &PostLocations,
        user: &UserId,
        op: LikeOp,
    ) -> StoreResult<()>;

    /// Atomically adjust the comment count on both physical copies
    async fn bump_comment_count(&self, locations: &PostLocations, delta: i32) -> StoreResult<()>;

    /// Delete both physical records of a post
    async fn delete(&self, locations: &PostLocations) -> StoreResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

/// Live view of a post's comments: an initial snapshot followed by a full
/// updated snapshot whenever the subcollection changes, until released.
pub struct CommentSubscription {
    stream: BoxStream<'static, Vec<Comment>>,
    canceller: Option<Box<dyn FnOnce() + Send>>,
}

impl CommentSubscription {
    /// Wrap a snapshot stream with the action that tears the listener down
    pub fn new(
        stream: BoxStream<'static, Vec<Comment>>,
        canceller: Box<dyn FnOnce() + Send>,
    ) -> Self {
        Self {
            stream,
            canceller: Some(canceller),
        }
    }

    /// Wait for the next snapshot; `None` once the subscription has closed
    pub async fn next_snapshot(&mut self) -> Option<Vec<Comment>> {
        self.stream.next().await
    }

    /// Release the subscription, removing the remote listener
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for CommentSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.canceller.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for CommentSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentSubscription").finish_non_exhaustive()
    }
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Append a comment to a post's subcollection, returning its id
    async fn append(&self, owner: &UserId, post: &DocId, comment: Comment) -> StoreResult<DocId>;

    /// List a post's comments, ascending by timestamp
    async fn list(&self, owner: &UserId, post: &DocId) -> StoreResult<Vec<Comment>>;

    /// Open a live subscription: the current snapshot is delivered first,
    /// then a fresh snapshot on every change, until the subscription is
    /// released.
    async fn subscribe(&self, owner: &UserId, post: &DocId) -> StoreResult<CommentSubscription>;
}

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by user id
    async fn find(&self, user: &UserId) -> StoreResult<Option<UserProfile>>;

    /// Create or replace a profile document
    async fn upsert(&self, profile: &UserProfile) -> StoreResult<()>;

    /// Update the display name
    async fn update_display_name(&self, user: &UserId, name: &str) -> StoreResult<()>;

    /// Update the free-form description inside the golf section
    async fn update_description(&self, user: &UserId, description: &str) -> StoreResult<()>;

    /// Replace the golf section wholesale
    async fn update_golf_info(&self, user: &UserId, info: GolfInfo) -> StoreResult<()>;

    /// Replace the recent-rounds list
    async fn replace_rounds(&self, user: &UserId, rounds: Vec<GolfRound>) -> StoreResult<()>;

    /// Update the avatar URL
    async fn set_photo_url(&self, user: &UserId, url: &str) -> StoreResult<()>;
}

// ============================================================================
// Media Store
// ============================================================================

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a media object, returning its public URL
    async fn put(&self, path: &MediaPath, bytes: Vec<u8>) -> StoreResult<String>;

    /// Delete a media object. Callers in the post-deletion flow treat a
    /// failure here as an orphan to log, not an error to surface.
    async fn delete(&self, path: &MediaPath) -> StoreResult<()>;
}
