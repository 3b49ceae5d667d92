//! View DTOs handed to the presentation layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use birdie_core::{Comment, DocId, PostSummary, UserId};

/// One post as rendered in a feed
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: DocId,
    pub author_id: UserId,
    pub author_display_name: String,
    pub author_photo_url: Option<String>,
    pub body: String,
    pub photo_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    /// Whether the viewing user has an active like on this post
    pub liked_by_me: bool,
    pub comment_count: u32,
}

impl PostView {
    pub fn from_summary(post: &PostSummary, viewer: &UserId) -> Self {
        Self {
            id: post.id.clone(),
            author_id: post.author_id.clone(),
            author_display_name: post.author_display_name.clone(),
            author_photo_url: post.author_photo_url.clone(),
            body: post.body.clone(),
            photo_url: post.photo_url.clone(),
            video_url: post.video_url.clone(),
            created_at: post.created_at,
            like_count: post.like_count,
            liked_by_me: post.is_liked_by(viewer),
            comment_count: post.comment_count,
        }
    }
}

/// The whole feed as rendered by the timeline
#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub posts: Vec<PostView>,
    pub is_loading_more: bool,
    pub is_exhausted: bool,
    /// True once the initial load came back with nothing
    pub is_empty: bool,
}

/// One comment as rendered in the expanded comment panel
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: DocId,
    pub author_display_name: String,
    pub author_photo_url: Option<String>,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            author_display_name: comment.author_display_name.clone(),
            author_photo_url: comment.author_photo_url.clone(),
            body: comment.body.clone(),
            timestamp: comment.timestamp,
        }
    }
}

/// One post with its interaction state
#[derive(Debug, Clone, Serialize)]
pub struct InteractionView {
    pub post: PostView,
    pub comments: Vec<CommentView>,
    pub comments_expanded: bool,
    pub comment_in_flight: bool,
}
