//! Value objects - immutable types that represent domain concepts

mod cursor;
mod doc_id;
mod location;

pub use cursor::PageCursor;
pub use doc_id::{DocId, DocIdParseError, UserId};
pub use location::{FeedScope, MediaKind, MediaPath, PostLocations};
