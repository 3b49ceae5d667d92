//! Request DTOs with validation

use serde::Deserialize;
use validator::Validate;

use birdie_core::MediaKind;

/// Media attached to a post at composition time
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub kind: MediaKind,
    pub bytes: Vec<u8>,
}

/// Compose a new post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ComposePostRequest {
    /// Post body, capped at the composer's input limit
    #[validate(length(min = 1, max = 180))]
    pub body: String,
    #[serde(skip)]
    pub media: Option<MediaUpload>,
}

/// Add a comment to a post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, max = 500))]
    pub body: String,
}

/// Update the profile display name
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDisplayNameRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Update the profile description
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDescriptionRequest {
    #[validate(length(max = 500))]
    pub description: String,
}

/// Record a played round
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordRoundRequest {
    pub date: chrono::NaiveDate,
    /// A scorecard cannot show fewer than 18 strokes
    #[validate(range(min = 18))]
    pub score: u32,
}
