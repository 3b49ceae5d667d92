//! Store ports - interfaces the domain consumes

mod stores;

pub use stores::{
    CommentRepository, CommentSubscription, FeedPage, MediaStore, PageQuery, PostRecord,
    PostRepository, ProfileRepository, StoreResult,
};
