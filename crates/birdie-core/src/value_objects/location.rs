//! Storage locations
//!
//! A logical post is stored twice: once in the global aggregate feed that
//! backs the home timeline, and once in the author's per-user feed that owns
//! the comment subcollection and attached media. `PostLocations` ties the two
//! physical records together so every mutation of shared fields goes through
//! one path and both copies stay in sync.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DocId, UserId};

/// Which physical collection a feed query targets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedScope {
    /// The global, cross-user aggregate feed (home timeline)
    Aggregate,
    /// A single author's own feed (profile page, comment/media owner)
    User(UserId),
}

impl FeedScope {
    /// Check whether this scope is the aggregate feed
    #[inline]
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate)
    }
}

impl fmt::Display for FeedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aggregate => write!(f, "aggregate"),
            Self::User(user) => write!(f, "user/{user}"),
        }
    }
}

/// The physical records of one logical post, linked by mirror ids.
///
/// Freshly composed posts carry both ids. A record read before its mirror
/// link was written may know only one side; mutations are applied to
/// whichever copies are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLocations {
    /// Author whose per-user feed owns the post
    pub author: UserId,
    /// Document id within the author's per-user feed
    pub feed_doc: Option<DocId>,
    /// Document id of the mirror copy in the aggregate feed
    pub aggregate_doc: Option<DocId>,
}

impl PostLocations {
    /// Link a per-user record with its aggregate mirror
    pub fn mirrored(author: UserId, feed_doc: DocId, aggregate_doc: DocId) -> Self {
        Self {
            author,
            feed_doc: Some(feed_doc),
            aggregate_doc: Some(aggregate_doc),
        }
    }

    /// A per-user record whose aggregate mirror is unknown
    pub fn feed_only(author: UserId, feed_doc: DocId) -> Self {
        Self {
            author,
            feed_doc: Some(feed_doc),
            aggregate_doc: None,
        }
    }

    /// An aggregate record whose per-user mirror is unknown
    pub fn aggregate_only(author: UserId, aggregate_doc: DocId) -> Self {
        Self {
            author,
            feed_doc: None,
            aggregate_doc: Some(aggregate_doc),
        }
    }

    /// The document owning the comment subcollection: the per-user copy
    #[inline]
    pub fn comment_doc(&self) -> Option<&DocId> {
        self.feed_doc.as_ref()
    }

    /// Whether both physical copies are known
    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.feed_doc.is_some() && self.aggregate_doc.is_some()
    }
}

/// Kind of media attached to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Path segment used in storage object names
    #[inline]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }
}

/// Storage location of a media object attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaPath {
    pub owner: UserId,
    pub post: DocId,
    pub kind: MediaKind,
}

impl MediaPath {
    /// Build the path for a post's attached media
    pub fn for_post(owner: UserId, post: DocId, kind: MediaKind) -> Self {
        Self { owner, post, kind }
    }
}

impl fmt::Display for MediaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner, self.post, self.kind.segment())
    }
}
