//! Data transfer objects
//!
//! Validated request types coming in from the presentation layer, and view
//! types going back out to it.

mod requests;
mod views;

pub use requests::{
    AddCommentRequest, ComposePostRequest, MediaUpload, RecordRoundRequest,
    UpdateDescriptionRequest, UpdateDisplayNameRequest,
};
pub use views::{CommentView, FeedView, InteractionView, PostView};
