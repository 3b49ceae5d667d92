//! Chat SDK capability traits
//!
//! The vendor chat client is modeled as three capabilities: a token
//! provider minting per-user credentials, a provider opening authenticated
//! sessions, and the session itself listing channels. Concrete SDK bindings
//! implement these; everything above depends only on the traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;

use birdie_core::UserId;

use crate::error::ChatResult;

/// Per-user credential minted by the token backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatToken(String);

impl ChatToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mints chat tokens for users
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Mint a token authenticating `user` against the chat backend
    async fn token_for(&self, user: &UserId) -> ChatResult<ChatToken>;
}

/// Query for the channels a user is a member of
#[derive(Debug, Clone)]
pub struct ChannelFilter {
    pub member: UserId,
    /// Maximum number of channels to return
    pub limit: usize,
}

/// One channel as shown in the chat list
#[derive(Debug, Clone)]
pub struct ChannelSummary {
    pub id: String,
    pub member_ids: Vec<UserId>,
    pub last_message: Option<String>,
    pub unread_count: u32,
}

impl ChannelSummary {
    /// The member on the other side of a direct channel
    pub fn counterpart(&self, me: &UserId) -> Option<&UserId> {
        self.member_ids.iter().find(|id| *id != me)
    }
}

/// One message delivered on an open channel
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub channel_id: String,
    pub sender: UserId,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Live message delivery for one channel, backlog first
pub type MessageStream = BoxStream<'static, ChatResult<ChatMessage>>;

/// An authenticated connection to the chat backend
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// List the channels matching a filter, most recent activity first
    async fn list_channels(&self, filter: ChannelFilter) -> ChatResult<Vec<ChannelSummary>>;

    /// Open a channel and stream its messages until the stream is dropped
    async fn open_channel(&self, channel_id: &str) -> ChatResult<MessageStream>;

    /// Close the connection
    async fn disconnect(&mut self) -> ChatResult<()>;
}

/// Opens authenticated chat sessions
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Connect as `user` with a previously minted token
    async fn connect(&self, user: &UserId, token: ChatToken)
        -> ChatResult<Box<dyn ChatSession>>;
}
