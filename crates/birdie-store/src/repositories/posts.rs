//! Post repository implementation

use async_trait::async_trait;
use tracing::instrument;

use birdie_core::{
    DocId, FeedPage, FeedScope, LikeOp, MediaKind, PageQuery, PostLocations, PostRecord,
    PostRepository, PostSummary, StoreResult, UserId,
};

use crate::store::MemoryStore;

/// In-memory implementation of [`PostRepository`]
#[derive(Debug, Clone)]
pub struct MemPostRepository {
    store: MemoryStore,
}

impl MemPostRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for MemPostRepository {
    #[instrument(skip(self))]
    async fn page(&self, scope: &FeedScope, query: PageQuery) -> StoreResult<FeedPage> {
        self.store.page(scope, &query)
    }

    #[instrument(skip(self))]
    async fn find(&self, scope: &FeedScope, id: &DocId) -> StoreResult<Option<PostSummary>> {
        Ok(self.store.find(scope, id))
    }

    #[instrument(skip(self, record))]
    async fn insert(&self, scope: &FeedScope, record: PostRecord) -> StoreResult<DocId> {
        Ok(self.store.insert(scope, record))
    }

    #[instrument(skip(self))]
    async fn link_mirror(&self, aggregate_doc: &DocId, feed_doc: &DocId) -> StoreResult<()> {
        self.store.link_mirror(aggregate_doc, feed_doc)
    }

    #[instrument(skip(self))]
    async fn set_media(
        &self,
        locations: &PostLocations,
        kind: MediaKind,
        url: &str,
    ) -> StoreResult<()> {
        self.store.set_media(locations, kind, url)
    }

    #[instrument(skip(self))]
    async fn apply_like(
        &self,
        locations: &PostLocations,
        user: &UserId,
        op: LikeOp,
    ) -> StoreResult<()> {
        self.store.apply_like(locations, user, op)
    }

    #[instrument(skip(self))]
    async fn bump_comment_count(&self, locations: &PostLocations, delta: i32) -> StoreResult<()> {
        self.store.bump_comment_count(locations, delta)
    }

    #[instrument(skip(self))]
    async fn delete(&self, locations: &PostLocations) -> StoreResult<()> {
        self.store.delete(locations)
    }
}
