//! Document and user identifiers
//!
//! The backing store assigns opaque string ids to documents. `DocId` mirrors
//! that shape: a fixed-length base-62 string, unique within a collection.
//! `UserId` is the auth provider's opaque user identifier.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a generated document id
pub const DOC_ID_LEN: usize = 20;

/// Opaque store-assigned document identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Wrap an existing id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id, the way the store mints them
    pub fn random() -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(DOC_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// Borrow the raw id string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, DocIdParseError> {
        if s.is_empty() {
            return Err(DocIdParseError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

/// Error when parsing a DocId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DocIdParseError {
    #[error("document id must not be empty")]
    Empty,
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::str::FromStr for DocId {
    type Err = DocIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocId::parse(s)
    }
}

/// Opaque user identifier assigned by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an existing user id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
