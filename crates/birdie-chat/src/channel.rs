//! Channel naming
//!
//! Direct-message channels are named deterministically from their two
//! members, so either side opens the same channel without a lookup.

use birdie_core::UserId;

/// Build the id of the direct channel between two users.
///
/// Member ids are sorted before joining, so the id is the same regardless
/// of who initiates.
pub fn direct_channel_id(a: &UserId, b: &UserId) -> String {
    let mut ids = [a.as_str(), b.as_str()];
    ids.sort_unstable();
    format!("chat_{}_{}", ids[0], ids[1])
}
