//! Comment repository implementation

use async_trait::async_trait;
use tracing::instrument;

use birdie_core::{
    Comment, CommentRepository, CommentSubscription, DocId, StoreResult, UserId,
};

use crate::store::MemoryStore;

/// In-memory implementation of [`CommentRepository`]
#[derive(Debug, Clone)]
pub struct MemCommentRepository {
    store: MemoryStore,
}

impl MemCommentRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for MemCommentRepository {
    #[instrument(skip(self, comment))]
    async fn append(&self, owner: &UserId, post: &DocId, comment: Comment) -> StoreResult<DocId> {
        Ok(self.store.append_comment(owner, post, comment))
    }

    #[instrument(skip(self))]
    async fn list(&self, owner: &UserId, post: &DocId) -> StoreResult<Vec<Comment>> {
        Ok(self.store.list_comments(owner, post))
    }

    #[instrument(skip(self))]
    async fn subscribe(&self, owner: &UserId, post: &DocId) -> StoreResult<CommentSubscription> {
        Ok(self.store.subscribe_comments(owner, post))
    }
}
