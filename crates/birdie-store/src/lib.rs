//! # birdie-store
//!
//! Storage layer backed by an in-process document store.
//!
//! The production system talks to a managed document database and an object
//! store next to it. This crate keeps the same contract the domain ports
//! demand of those services - store-owned feed ordering, atomic counter and
//! set mutations applied to both physical copies of a post, and snapshot
//! subscriptions on comment subcollections - over in-memory collections, so
//! the application layer and every test run against real port semantics.

pub mod media;
pub mod repositories;
pub mod store;

pub use media::MemMediaStore;
pub use repositories::{MemCommentRepository, MemPostRepository, MemProfileRepository};
pub use store::MemoryStore;
