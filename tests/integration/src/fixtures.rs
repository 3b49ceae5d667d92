//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use birdie_core::{UserId, UserProfile};
use birdie_feed::dto::{AddCommentRequest, ComposePostRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A user profile with a unique id
pub fn unique_user(name: &str) -> UserProfile {
    let suffix = unique_suffix();
    UserProfile::new(UserId::new(format!("{name}-{suffix}")), name)
}

/// A simple compose request without media
pub fn compose_request(body: &str) -> ComposePostRequest {
    ComposePostRequest {
        body: body.to_string(),
        media: None,
    }
}

/// A simple comment request
pub fn comment_request(body: &str) -> AddCommentRequest {
    AddCommentRequest {
        body: body.to_string(),
    }
}
