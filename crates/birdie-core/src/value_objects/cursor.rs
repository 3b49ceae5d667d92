//! Pagination cursor
//!
//! A cursor marks the end of the last fetched page so the next query can
//! resume after it. It is opaque to the presentation layer, held only for
//! the lifetime of one mounted feed, and never persisted.

use chrono::{DateTime, Utc};

/// Opaque handle to the last item of a fetched page.
///
/// The store orders documents by creation time descending, with ties broken
/// by the store-assigned insertion sequence. The cursor carries both so a
/// page boundary between equal timestamps stays stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    created_at: DateTime<Utc>,
    seq: u64,
}

impl PageCursor {
    /// Create a cursor positioned at a document
    pub fn new(created_at: DateTime<Utc>, seq: u64) -> Self {
        Self { created_at, seq }
    }

    /// Creation timestamp of the document the cursor points at
    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Store-assigned insertion sequence of the document
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}
