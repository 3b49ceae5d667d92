//! # birdie-feed
//!
//! Application layer: the feed paginator, the per-post interaction tracker,
//! and the composition and profile services behind them. Services run over a
//! [`ServiceContext`] holding the store ports, so any backend satisfying the
//! domain contracts can sit underneath.

pub mod dto;
pub mod services;

pub use services::{
    FeedPaginator, LoadOutcome, PostInteractionTracker, PostService, ProfileService,
    ScrollMetrics, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SkipReason,
};
