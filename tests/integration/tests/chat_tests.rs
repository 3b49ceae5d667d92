//! Chat boundary flows: token minting, session listing, preview cache

use async_trait::async_trait;
use futures::StreamExt;

use birdie_chat::{
    direct_channel_id, ChannelFilter, ChannelSummary, ChannelPreviewCache, ChatError,
    ChatMessage, ChatProvider, ChatResult, ChatSession, ChatToken, MessageStream,
    TokenProvider,
};
use birdie_common::PreviewCacheConfig;
use birdie_core::{ProfileRepository, UserId, UserProfile};
use birdie_store::{MemProfileRepository, MemoryStore};
use integration_tests::unique_user;

/// Token provider that mints predictable tokens
struct StaticTokens;

#[async_trait]
impl TokenProvider for StaticTokens {
    async fn token_for(&self, user: &UserId) -> ChatResult<ChatToken> {
        Ok(ChatToken::new(format!("token-{user}")))
    }
}

/// Provider whose sessions list a fixed channel set
struct FixedChannels {
    channels: Vec<ChannelSummary>,
}

struct FixedSession {
    channels: Vec<ChannelSummary>,
    connected: bool,
}

#[async_trait]
impl ChatSession for FixedSession {
    async fn list_channels(&self, filter: ChannelFilter) -> ChatResult<Vec<ChannelSummary>> {
        if !self.connected {
            return Err(ChatError::Disconnected);
        }
        Ok(self
            .channels
            .iter()
            .filter(|c| c.member_ids.contains(&filter.member))
            .take(filter.limit)
            .cloned()
            .collect())
    }

    async fn open_channel(&self, channel_id: &str) -> ChatResult<MessageStream> {
        if !self.connected {
            return Err(ChatError::Disconnected);
        }
        let backlog: Vec<_> = self
            .channels
            .iter()
            .filter(|c| c.id == channel_id)
            .filter_map(|c| {
                let body = c.last_message.clone()?;
                Some(Ok(ChatMessage {
                    channel_id: c.id.clone(),
                    sender: c.member_ids[0].clone(),
                    body,
                    sent_at: chrono::Utc::now(),
                }))
            })
            .collect();
        Ok(futures::stream::iter(backlog).boxed())
    }

    async fn disconnect(&mut self) -> ChatResult<()> {
        self.connected = false;
        Ok(())
    }
}

#[async_trait]
impl ChatProvider for FixedChannels {
    async fn connect(
        &self,
        _user: &UserId,
        token: ChatToken,
    ) -> ChatResult<Box<dyn ChatSession>> {
        if token.as_str().is_empty() {
            return Err(ChatError::Auth("empty token".to_string()));
        }
        Ok(Box::new(FixedSession {
            channels: self.channels.clone(),
            connected: true,
        }))
    }
}

fn direct_channel(a: &UserId, b: &UserId, last: &str) -> ChannelSummary {
    ChannelSummary {
        id: direct_channel_id(a, b),
        member_ids: vec![a.clone(), b.clone()],
        last_message: Some(last.to_string()),
        unread_count: 0,
    }
}

#[tokio::test]
async fn test_connect_and_list_own_channels() {
    let me = UserId::new("me");
    let friend = UserId::new("friend");
    let other_a = UserId::new("a");
    let other_b = UserId::new("b");

    let provider = FixedChannels {
        channels: vec![
            direct_channel(&me, &friend, "see you on the tee"),
            direct_channel(&other_a, &other_b, "not my conversation"),
        ],
    };

    let token = StaticTokens.token_for(&me).await.unwrap();
    assert_eq!(token.as_str(), "token-me");

    let session = provider.connect(&me, token).await.unwrap();
    let channels = session
        .list_channels(ChannelFilter {
            member: me.clone(),
            limit: 10,
        })
        .await
        .unwrap();

    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].id, direct_channel_id(&friend, &me));
}

#[tokio::test]
async fn test_open_channel_streams_the_backlog() {
    let me = UserId::new("me");
    let friend = UserId::new("friend");
    let channel = direct_channel(&me, &friend, "fore!");

    let provider = FixedChannels {
        channels: vec![channel.clone()],
    };
    let session = provider.connect(&me, ChatToken::new("t")).await.unwrap();

    let mut stream = session.open_channel(&channel.id).await.unwrap();
    let message = stream.next().await.unwrap().unwrap();
    assert_eq!(message.channel_id, channel.id);
    assert_eq!(message.body, "fore!");
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_disconnected_session_refuses_listing() {
    let me = UserId::new("me");
    let provider = FixedChannels { channels: vec![] };
    let mut session = provider
        .connect(&me, ChatToken::new("t"))
        .await
        .unwrap();
    session.disconnect().await.unwrap();

    let err = session
        .list_channels(ChannelFilter {
            member: me,
            limit: 10,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Disconnected));
}

#[tokio::test]
async fn test_preview_cache_resolves_channel_counterparts() {
    let store = MemoryStore::new();
    let repo = MemProfileRepository::new(store.clone());

    let me = unique_user("me");
    let friend = unique_user("friend");
    repo.upsert(&friend).await.unwrap();

    let cache = ChannelPreviewCache::new(&PreviewCacheConfig::default());
    let channel = direct_channel(&me.id, &friend.id, "nice round today");

    let resolved = cache
        .counterpart_profile(&repo, &channel, &me.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, friend.id);
    assert_eq!(cache.len(), 1);

    // Unknown counterparts resolve to nothing and are not cached
    let stranger_channel = direct_channel(&me.id, &UserId::new("ghost"), "hello?");
    let resolved = cache
        .counterpart_profile(&repo, &stranger_channel, &me.id)
        .await
        .unwrap();
    assert!(resolved.is_none());
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_preview_cache_respects_capacity() {
    let store = MemoryStore::new();
    let repo = MemProfileRepository::new(store.clone());
    let me = UserId::new("me");

    let cache = ChannelPreviewCache::new(&PreviewCacheConfig {
        capacity: 2,
        ttl_secs: 300,
    });

    let mut friends = Vec::new();
    for name in ["ann", "ben", "cal"] {
        let friend = UserProfile::new(UserId::new(name), name);
        repo.upsert(&friend).await.unwrap();
        friends.push(friend);
    }

    for friend in &friends {
        let channel = direct_channel(&me, &friend.id, "hi");
        cache
            .counterpart_profile(&repo, &channel, &me)
            .await
            .unwrap()
            .unwrap();
    }

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&UserId::new("ann")).is_none());
    assert!(cache.get(&UserId::new("cal")).is_some());
}
