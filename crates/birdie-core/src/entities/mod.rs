//! Domain entities - core business objects

mod comment;
mod post;
mod profile;

pub use comment::Comment;
pub use post::{LikeOp, PostSummary, MAX_POST_CODE_POINTS};
pub use profile::{GolfInfo, GolfRound, UserProfile};
