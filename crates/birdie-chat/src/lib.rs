//! # birdie-chat
//!
//! Boundary to the vendor chat SDK. The vendor client itself stays behind
//! capability traits - token minting, connection, channel listing, message
//! streaming - so the rest of the application never touches the SDK types
//! directly. Also home
//! to the deterministic direct-channel naming scheme and the bounded,
//! TTL-expiring cache that backs channel-preview rendering.

pub mod channel;
pub mod error;
pub mod preview;
pub mod provider;

pub use channel::direct_channel_id;
pub use error::{ChatError, ChatResult};
pub use preview::ChannelPreviewCache;
pub use provider::{
    ChannelFilter, ChannelSummary, ChatMessage, ChatProvider, ChatSession, ChatToken,
    MessageStream, TokenProvider,
};
