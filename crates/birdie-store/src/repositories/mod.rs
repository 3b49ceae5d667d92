//! Repository implementations over the in-memory document store

mod comments;
mod posts;
mod profiles;

pub use comments::MemCommentRepository;
pub use posts::MemPostRepository;
pub use profiles::MemProfileRepository;
