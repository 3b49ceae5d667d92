//! Integration test utilities for the birdie backend
//!
//! Provides fixtures and helpers for exercising the feed, interaction, and
//! chat-boundary flows against the in-memory document store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
