//! # birdie-core
//!
//! Domain layer containing entities, value objects, store ports, and domain errors.
//! This crate has zero dependencies on infrastructure (storage backend, chat SDK, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, GolfInfo, GolfRound, LikeOp, PostSummary, UserProfile, MAX_POST_CODE_POINTS,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, CommentSubscription, FeedPage, MediaStore, PageQuery, PostRecord,
    PostRepository, ProfileRepository, StoreResult,
};
pub use value_objects::{
    DocId, DocIdParseError, FeedScope, MediaKind, MediaPath, PageCursor, PostLocations, UserId,
};
