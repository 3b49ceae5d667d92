//! Post service
//!
//! Composes new posts: one logical post becomes two physical records, the
//! aggregate-feed copy first and the author's feed copy second, linked by
//! mirror ids. Attached media is uploaded after the records exist and its
//! URL is patched onto both copies.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use birdie_core::{
    FeedScope, MediaPath, PostLocations, PostRecord, PostSummary, UserProfile,
};

use crate::dto::ComposePostRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post composition service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compose a new post for an author
    #[instrument(skip(self, author, request), fields(author = %author.id))]
    pub async fn compose(
        &self,
        author: &UserProfile,
        request: ComposePostRequest,
    ) -> ServiceResult<PostSummary> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        PostSummary::validate_body(&request.body)?;

        let record = PostRecord {
            author_id: author.id.clone(),
            author_display_name: author.display_name_or_anonymous().to_string(),
            author_photo_url: author.photo_url.clone(),
            body: request.body.clone(),
            created_at: Utc::now(),
            aggregate_doc: None,
        };

        // Aggregate copy first, then the author's copy carrying the link back
        let aggregate_doc = self
            .ctx
            .post_repo()
            .insert(&FeedScope::Aggregate, record.clone())
            .await?;

        let mut user_record = record;
        user_record.aggregate_doc = Some(aggregate_doc.clone());
        let feed_doc = self
            .ctx
            .post_repo()
            .insert(&FeedScope::User(author.id.clone()), user_record)
            .await?;

        self.ctx
            .post_repo()
            .link_mirror(&aggregate_doc, &feed_doc)
            .await?;

        let locations =
            PostLocations::mirrored(author.id.clone(), feed_doc.clone(), aggregate_doc.clone());

        if let Some(upload) = request.media {
            let path = MediaPath::for_post(author.id.clone(), feed_doc.clone(), upload.kind);
            let url = self.ctx.media_store().put(&path, upload.bytes).await?;
            self.ctx
                .post_repo()
                .set_media(&locations, upload.kind, &url)
                .await?;
        }

        let post = self
            .ctx
            .post_repo()
            .find(&FeedScope::User(author.id.clone()), &feed_doc)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", feed_doc.to_string()))?;

        info!(
            feed_doc = %feed_doc,
            aggregate_doc = %aggregate_doc,
            has_media = post.has_media(),
            "Post composed"
        );
        Ok(post)
    }
}
