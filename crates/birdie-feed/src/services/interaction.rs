//! Post interaction tracker
//!
//! Per-post state for one viewing user: the like toggle, the comment panel,
//! and deletion. Likes are applied optimistically - the local view flips
//! immediately and a failed remote write is logged, never rolled back.
//! Comments arrive through a live snapshot subscription opened for the
//! lifetime of the tracker.

use tracing::{info, instrument, warn};

use birdie_core::{
    Comment, CommentSubscription, DocId, DomainError, LikeOp, MediaKind, MediaPath, PostSummary,
    UserProfile,
};

use crate::dto::{CommentView, InteractionView, PostView};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Interaction state of one rendered post
pub struct PostInteractionTracker {
    ctx: ServiceContext,
    viewer: UserProfile,
    post: PostSummary,
    comments: Vec<Comment>,
    comments_expanded: bool,
    comment_in_flight: bool,
    subscription: Option<CommentSubscription>,
}

impl PostInteractionTracker {
    /// Create a tracker for a post, opening its comment subscription.
    ///
    /// The subscription lives as long as the tracker; dropping the tracker
    /// (or deleting the post) releases the listener.
    #[instrument(skip(ctx, post, viewer), fields(post_id = %post.id, viewer = %viewer.id))]
    pub async fn new(
        ctx: ServiceContext,
        post: PostSummary,
        viewer: UserProfile,
    ) -> ServiceResult<Self> {
        let subscription = match post.locations.comment_doc() {
            Some(doc) => Some(
                ctx.comment_repo()
                    .subscribe(&post.locations.author, doc)
                    .await?,
            ),
            None => None,
        };

        Ok(Self {
            ctx,
            viewer,
            post,
            comments: Vec::new(),
            comments_expanded: false,
            comment_in_flight: false,
            subscription,
        })
    }

    /// Toggle the viewer's like.
    ///
    /// The local state flips before the remote write; if the write fails the
    /// optimistic state is kept and the failure is only logged. The view and
    /// the store reconcile on the next feed fetch.
    #[instrument(skip(self), fields(post_id = %self.post.id))]
    pub async fn toggle_like(&mut self) -> ServiceResult<LikeOp> {
        let viewer = self.viewer.id.clone();
        let op = self.post.toggle_like(&viewer);

        if let Err(err) = self
            .ctx
            .post_repo()
            .apply_like(&self.post.locations, &viewer, op)
            .await
        {
            warn!(error = %err, ?op, "Like write failed; keeping optimistic state");
        }
        Ok(op)
    }

    /// Submit a comment.
    ///
    /// Blank bodies are rejected before anything is written. While one
    /// submission is awaiting the store, further submissions are ignored and
    /// return `None`. A successful submission expands the comment panel.
    #[instrument(skip(self, body), fields(post_id = %self.post.id))]
    pub async fn add_comment(&mut self, body: &str) -> ServiceResult<Option<DocId>> {
        Comment::validate_body(body)?;

        if self.comment_in_flight {
            return Ok(None);
        }

        let doc = self
            .post
            .locations
            .comment_doc()
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Post", self.post.id.to_string()))?;
        let owner = self.post.locations.author.clone();

        let comment = Comment::new(
            DocId::random(),
            doc.clone(),
            self.viewer.id.clone(),
            self.viewer.display_name_or_anonymous().to_string(),
            self.viewer.photo_url.clone(),
            body.to_string(),
        );

        self.comment_in_flight = true;
        let result = self.ctx.comment_repo().append(&owner, &doc, comment.clone()).await;
        self.comment_in_flight = false;

        let id = result?;

        // Count drift is tolerable; the comment itself is already stored
        if let Err(err) = self
            .ctx
            .post_repo()
            .bump_comment_count(&self.post.locations, 1)
            .await
        {
            warn!(error = %err, "Comment count update failed");
        }

        self.post.comment_count += 1;
        self.comments.push(comment);
        self.comments_expanded = true;

        info!(comment_id = %id, "Comment added");
        Ok(Some(id))
    }

    /// Wait for the next comment snapshot and apply it.
    ///
    /// Returns `false` once the subscription has closed.
    pub async fn sync_comments(&mut self) -> ServiceResult<bool> {
        let Some(subscription) = self.subscription.as_mut() else {
            return Ok(false);
        };
        match subscription.next_snapshot().await {
            Some(snapshot) => {
                self.comments = snapshot;
                Ok(true)
            }
            None => {
                self.subscription = None;
                Ok(false)
            }
        }
    }

    /// Show or hide the comment panel
    pub fn toggle_comments(&mut self) -> bool {
        self.comments_expanded = !self.comments_expanded;
        self.comments_expanded
    }

    /// Release the comment subscription without dropping the tracker
    pub fn release_comments(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
    }

    /// Delete the post.
    ///
    /// Only the author may delete; the check runs before any remote call.
    /// Record deletion must succeed; attached media cleanup is best effort,
    /// with failures logged as orphans.
    #[instrument(skip(self), fields(post_id = %self.post.id))]
    pub async fn delete(mut self) -> ServiceResult<()> {
        if !self.post.is_authored_by(&self.viewer.id) {
            return Err(DomainError::NotPostAuthor.into());
        }

        self.release_comments();
        self.ctx.post_repo().delete(&self.post.locations).await?;

        for kind in self.attached_media_kinds() {
            let Some(doc) = self.post.locations.feed_doc.clone() else {
                warn!(?kind, "Media doc unknown; object orphaned");
                continue;
            };
            let path = MediaPath::for_post(self.post.locations.author.clone(), doc, kind);
            if let Err(err) = self.ctx.media_store().delete(&path).await {
                warn!(error = %err, %path, "Media cleanup failed; object orphaned");
            }
        }

        info!("Post deleted");
        Ok(())
    }

    fn attached_media_kinds(&self) -> Vec<MediaKind> {
        let mut kinds = Vec::new();
        if self.post.photo_url.is_some() {
            kinds.push(MediaKind::Photo);
        }
        if self.post.video_url.is_some() {
            kinds.push(MediaKind::Video);
        }
        kinds
    }

    /// Render the current interaction state
    pub fn view(&self) -> InteractionView {
        InteractionView {
            post: PostView::from_summary(&self.post, &self.viewer.id),
            comments: self.comments.iter().map(CommentView::from).collect(),
            comments_expanded: self.comments_expanded,
            comment_in_flight: self.comment_in_flight,
        }
    }

    pub fn post(&self) -> &PostSummary {
        &self.post
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comments_expanded(&self) -> bool {
        self.comments_expanded
    }
}

impl std::fmt::Debug for PostInteractionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostInteractionTracker")
            .field("post_id", &self.post.id)
            .field("viewer", &self.viewer.id)
            .field("comments", &self.comments.len())
            .field("comments_expanded", &self.comments_expanded)
            .finish_non_exhaustive()
    }
}
