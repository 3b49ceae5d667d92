//! Test environment helpers

use std::sync::Arc;

use birdie_common::FeedConfig;
use birdie_core::{PostSummary, UserProfile};
use birdie_feed::{PostService, ServiceContext};
use birdie_store::{
    MemCommentRepository, MemMediaStore, MemPostRepository, MemProfileRepository, MemoryStore,
};

use crate::fixtures::compose_request;

/// One in-memory backend with a service context wired over it
pub struct TestEnv {
    pub store: MemoryStore,
    pub media: MemMediaStore,
    pub ctx: ServiceContext,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let media = MemMediaStore::new();
        let ctx = ServiceContext::new(
            Arc::new(MemPostRepository::new(store.clone())),
            Arc::new(MemCommentRepository::new(store.clone())),
            Arc::new(MemProfileRepository::new(store.clone())),
            Arc::new(media.clone()),
            FeedConfig::default(),
        );
        Self { store, media, ctx }
    }

    /// Compose one post through the service layer
    pub async fn compose(&self, author: &UserProfile, body: &str) -> PostSummary {
        PostService::new(&self.ctx)
            .compose(author, compose_request(body))
            .await
            .expect("compose failed")
    }

    /// Compose `count` posts for an author, oldest first
    pub async fn compose_many(&self, author: &UserProfile, count: usize) -> Vec<PostSummary> {
        let mut posts = Vec::with_capacity(count);
        for i in 0..count {
            posts.push(self.compose(author, &format!("post {i}")).await);
        }
        posts
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
