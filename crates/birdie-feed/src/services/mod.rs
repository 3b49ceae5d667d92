//! Application services

mod context;
mod error;
mod interaction;
mod paginator;
mod post;
mod profile;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use interaction::PostInteractionTracker;
pub use paginator::{FeedPaginator, LoadOutcome, ScrollMetrics, SkipReason};
pub use post::PostService;
pub use profile::ProfileService;
