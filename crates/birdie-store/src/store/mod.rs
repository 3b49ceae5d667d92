//! In-memory document store
//!
//! One `MemoryStore` stands in for the whole managed document database: the
//! aggregate feed collection, the per-user feed collections, the comment
//! subcollections under per-user records, and the profile documents. The
//! repository types in [`crate::repositories`] are thin ports over this
//! backend, mirroring how a database layer wraps a connection pool.
//!
//! Feed ordering is owned here: documents sort by `created_at` descending
//! with ties broken by a store-assigned insertion sequence, and page queries
//! resume strictly after a [`PageCursor`] in that order.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures::stream;
use futures::StreamExt;
use tokio::sync::broadcast;

use birdie_core::{
    Comment, CommentSubscription, DocId, DomainError, FeedPage, FeedScope, LikeOp, MediaKind,
    PageCursor, PageQuery, PostLocations, PostRecord, PostSummary, StoreResult, UserId,
    UserProfile,
};

/// Sort key within one feed collection: `(created_at, seq)` ascending in the
/// map, iterated in reverse for newest-first reads.
type SortKey = (DateTime<Utc>, u64);

/// Comment subcollections are keyed by the owning user and the per-user feed
/// record they hang off.
type CommentKey = (UserId, DocId);

const COMMENT_CHANNEL_CAPACITY: usize = 16;

/// One stored physical post record
#[derive(Debug, Clone)]
struct StoredPost {
    id: DocId,
    author_id: UserId,
    author_display_name: String,
    author_photo_url: Option<String>,
    body: String,
    created_at: DateTime<Utc>,
    seq: u64,
    photo_url: Option<String>,
    video_url: Option<String>,
    like_count: u32,
    liked_by: HashSet<UserId>,
    comment_count: u32,
    /// Id of this record's copy in the other collection, once linked
    mirror: Option<DocId>,
}

impl StoredPost {
    fn to_summary(&self, scope: &FeedScope) -> PostSummary {
        let locations = match scope {
            FeedScope::Aggregate => PostLocations {
                author: self.author_id.clone(),
                feed_doc: self.mirror.clone(),
                aggregate_doc: Some(self.id.clone()),
            },
            FeedScope::User(_) => PostLocations {
                author: self.author_id.clone(),
                feed_doc: Some(self.id.clone()),
                aggregate_doc: self.mirror.clone(),
            },
        };
        PostSummary {
            id: self.id.clone(),
            author_id: self.author_id.clone(),
            author_display_name: self.author_display_name.clone(),
            author_photo_url: self.author_photo_url.clone(),
            body: self.body.clone(),
            photo_url: self.photo_url.clone(),
            video_url: self.video_url.clone(),
            created_at: self.created_at,
            like_count: self.like_count,
            liked_by: self.liked_by.clone(),
            comment_count: self.comment_count,
            locations,
        }
    }
}

/// One feed collection with its id index
#[derive(Debug, Default)]
struct Collection {
    by_key: BTreeMap<SortKey, StoredPost>,
    by_id: HashMap<DocId, SortKey>,
}

/// Live listener state for one comment subcollection
struct Watcher {
    tx: broadcast::Sender<Vec<Comment>>,
    subscribers: usize,
}

impl Watcher {
    fn new() -> Self {
        let (tx, _) = broadcast::channel(COMMENT_CHANNEL_CAPACITY);
        Self { tx, subscribers: 0 }
    }
}

struct Inner {
    seq: AtomicU64,
    feeds: DashMap<FeedScope, Collection>,
    comments: DashMap<CommentKey, Vec<Comment>>,
    watchers: DashMap<CommentKey, Watcher>,
    profiles: DashMap<UserId, UserProfile>,
    fail_next_page: AtomicBool,
}

/// Shared handle to the in-memory document store
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                seq: AtomicU64::new(0),
                feeds: DashMap::new(),
                comments: DashMap::new(),
                watchers: DashMap::new(),
                profiles: DashMap::new(),
                fail_next_page: AtomicBool::new(false),
            }),
        }
    }

    /// Make the next page query fail with a store error. Test hook for
    /// exercising fetch-failure handling in the pagination flow.
    pub fn fail_next_page(&self) {
        self.inner.fail_next_page.store(true, Ordering::SeqCst);
    }

    /// Number of live comment listeners on a post. Test hook.
    pub fn active_comment_listeners(&self, owner: &UserId, post: &DocId) -> usize {
        self.inner
            .watchers
            .get(&(owner.clone(), post.clone()))
            .map_or(0, |w| w.subscribers)
    }

    // ------------------------------------------------------------------
    // Post records
    // ------------------------------------------------------------------

    pub(crate) fn page(&self, scope: &FeedScope, query: &PageQuery) -> StoreResult<FeedPage> {
        if self.inner.fail_next_page.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Store("page query failed".to_string()));
        }

        let Some(col) = self.inner.feeds.get(scope) else {
            return Ok(FeedPage {
                items: Vec::new(),
                next_cursor: None,
            });
        };

        let items: Vec<PostSummary> = match &query.after {
            None => col
                .by_key
                .iter()
                .rev()
                .take(query.limit)
                .map(|(_, post)| post.to_summary(scope))
                .collect(),
            Some(cursor) => col
                .by_key
                .range(..(cursor.created_at(), cursor.seq()))
                .rev()
                .take(query.limit)
                .map(|(_, post)| post.to_summary(scope))
                .collect(),
        };

        let next_cursor = items.last().and_then(|last| {
            col.by_id
                .get(&last.id)
                .map(|&(at, seq)| PageCursor::new(at, seq))
        });

        Ok(FeedPage { items, next_cursor })
    }

    pub(crate) fn find(&self, scope: &FeedScope, id: &DocId) -> Option<PostSummary> {
        let col = self.inner.feeds.get(scope)?;
        let key = col.by_id.get(id)?;
        col.by_key.get(key).map(|post| post.to_summary(scope))
    }

    pub(crate) fn insert(&self, scope: &FeedScope, record: PostRecord) -> DocId {
        let id = DocId::random();
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst);
        let post = StoredPost {
            id: id.clone(),
            author_id: record.author_id,
            author_display_name: record.author_display_name,
            author_photo_url: record.author_photo_url,
            body: record.body,
            created_at: record.created_at,
            seq,
            photo_url: None,
            video_url: None,
            like_count: 0,
            liked_by: HashSet::new(),
            comment_count: 0,
            mirror: record.aggregate_doc,
        };
        let mut col = self.inner.feeds.entry(scope.clone()).or_default();
        col.by_id.insert(id.clone(), (post.created_at, seq));
        col.by_key.insert((post.created_at, seq), post);
        id
    }

    pub(crate) fn link_mirror(&self, aggregate_doc: &DocId, feed_doc: &DocId) -> StoreResult<()> {
        let feed_doc = feed_doc.clone();
        if self.mutate(&FeedScope::Aggregate, aggregate_doc, move |post| {
            post.mirror = Some(feed_doc);
        }) {
            Ok(())
        } else {
            Err(DomainError::PostNotFound(aggregate_doc.clone()))
        }
    }

    pub(crate) fn set_media(
        &self,
        locations: &PostLocations,
        kind: MediaKind,
        url: &str,
    ) -> StoreResult<()> {
        self.mutate_locations(locations, |post| match kind {
            MediaKind::Photo => post.photo_url = Some(url.to_string()),
            MediaKind::Video => post.video_url = Some(url.to_string()),
        })
    }

    pub(crate) fn apply_like(
        &self,
        locations: &PostLocations,
        user: &UserId,
        op: LikeOp,
    ) -> StoreResult<()> {
        self.mutate_locations(locations, |post| match op {
            LikeOp::Like => {
                if post.liked_by.insert(user.clone()) {
                    post.like_count += 1;
                }
            }
            LikeOp::Unlike => {
                if post.liked_by.remove(user) {
                    post.like_count = post.like_count.saturating_sub(1);
                }
            }
        })
    }

    pub(crate) fn bump_comment_count(
        &self,
        locations: &PostLocations,
        delta: i32,
    ) -> StoreResult<()> {
        self.mutate_locations(locations, |post| {
            if delta >= 0 {
                post.comment_count += delta.unsigned_abs();
            } else {
                post.comment_count = post.comment_count.saturating_sub(delta.unsigned_abs());
            }
        })
    }

    pub(crate) fn delete(&self, locations: &PostLocations) -> StoreResult<()> {
        let mut removed = false;
        if let Some(id) = &locations.aggregate_doc {
            removed |= self.remove(&FeedScope::Aggregate, id);
        }
        if let Some(id) = &locations.feed_doc {
            removed |= self.remove(&FeedScope::User(locations.author.clone()), id);
        }
        if !removed {
            return Err(DomainError::PostNotFound(Self::best_id(locations)));
        }

        // Tear down the comment thread with the post. Dropping the watcher
        // closes every open subscription stream.
        if let Some(doc) = locations.comment_doc() {
            let key = (locations.author.clone(), doc.clone());
            self.inner.comments.remove(&key);
            self.inner.watchers.remove(&key);
        }
        Ok(())
    }

    fn remove(&self, scope: &FeedScope, id: &DocId) -> bool {
        let Some(mut col) = self.inner.feeds.get_mut(scope) else {
            return false;
        };
        let Collection { by_key, by_id } = &mut *col;
        match by_id.remove(id) {
            Some(key) => by_key.remove(&key).is_some(),
            None => false,
        }
    }

    fn mutate<F>(&self, scope: &FeedScope, id: &DocId, f: F) -> bool
    where
        F: FnOnce(&mut StoredPost),
    {
        let Some(mut col) = self.inner.feeds.get_mut(scope) else {
            return false;
        };
        let Collection { by_key, by_id } = &mut *col;
        let Some(key) = by_id.get(id) else {
            return false;
        };
        match by_key.get_mut(key) {
            Some(post) => {
                f(post);
                true
            }
            None => false,
        }
    }

    /// Apply one mutation to every known physical copy of a post
    fn mutate_locations<F>(&self, locations: &PostLocations, f: F) -> StoreResult<()>
    where
        F: Fn(&mut StoredPost),
    {
        let mut touched = false;
        if let Some(id) = &locations.aggregate_doc {
            touched |= self.mutate(&FeedScope::Aggregate, id, &f);
        }
        if let Some(id) = &locations.feed_doc {
            touched |= self.mutate(&FeedScope::User(locations.author.clone()), id, &f);
        }
        if touched {
            Ok(())
        } else {
            Err(DomainError::PostNotFound(Self::best_id(locations)))
        }
    }

    fn best_id(locations: &PostLocations) -> DocId {
        locations
            .feed_doc
            .clone()
            .or_else(|| locations.aggregate_doc.clone())
            .unwrap_or_else(|| DocId::new("unknown"))
    }

    // ------------------------------------------------------------------
    // Comment subcollections
    // ------------------------------------------------------------------

    pub(crate) fn append_comment(&self, owner: &UserId, post: &DocId, comment: Comment) -> DocId {
        let key = (owner.clone(), post.clone());
        let id = comment.id.clone();
        let snapshot = {
            let mut list = self.inner.comments.entry(key.clone()).or_default();
            list.push(comment);
            // Stable sort: equal timestamps keep append order
            list.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            list.clone()
        };
        self.notify_comment_watchers(&key, snapshot);
        id
    }

    pub(crate) fn list_comments(&self, owner: &UserId, post: &DocId) -> Vec<Comment> {
        self.inner
            .comments
            .get(&(owner.clone(), post.clone()))
            .map(|list| list.value().clone())
            .unwrap_or_default()
    }

    pub(crate) fn subscribe_comments(&self, owner: &UserId, post: &DocId) -> CommentSubscription {
        let key = (owner.clone(), post.clone());
        let snapshot = self.list_comments(owner, post);
        let rx = {
            let mut watcher = self
                .inner
                .watchers
                .entry(key.clone())
                .or_insert_with(Watcher::new);
            watcher.subscribers += 1;
            watcher.tx.subscribe()
        };

        let stream = stream::unfold((Some(snapshot), rx), |(initial, mut rx)| async move {
            if let Some(snap) = initial {
                return Some((snap, (None, rx)));
            }
            loop {
                match rx.recv().await {
                    Ok(snap) => return Some((snap, (None, rx))),
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        // Skipped intermediate snapshots; the next one is
                        // still a full view, so just keep receiving.
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed();

        let store = self.clone();
        CommentSubscription::new(
            stream,
            Box::new(move || store.release_comment_watcher(&key)),
        )
    }

    fn notify_comment_watchers(&self, key: &CommentKey, snapshot: Vec<Comment>) {
        if let Some(watcher) = self.inner.watchers.get(key) {
            // Send only fails when no receiver is alive, which is fine
            let _ = watcher.tx.send(snapshot);
        }
    }

    fn release_comment_watcher(&self, key: &CommentKey) {
        if let Some(mut watcher) = self.inner.watchers.get_mut(key) {
            watcher.subscribers = watcher.subscribers.saturating_sub(1);
        }
        self.inner.watchers.remove_if(key, |_, w| w.subscribers == 0);
    }

    // ------------------------------------------------------------------
    // Profile documents
    // ------------------------------------------------------------------

    pub(crate) fn find_profile(&self, user: &UserId) -> Option<UserProfile> {
        self.inner.profiles.get(user).map(|p| p.value().clone())
    }

    pub(crate) fn upsert_profile(&self, profile: UserProfile) {
        self.inner.profiles.insert(profile.id.clone(), profile);
    }

    pub(crate) fn update_profile<F>(&self, user: &UserId, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut UserProfile),
    {
        match self.inner.profiles.get_mut(user) {
            Some(mut profile) => {
                f(&mut profile);
                Ok(())
            }
            None => Err(DomainError::ProfileNotFound(user.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(author: &str, body: &str, at_secs: i64) -> PostRecord {
        PostRecord {
            author_id: UserId::new(author),
            author_display_name: author.to_string(),
            author_photo_url: None,
            body: body.to_string(),
            created_at: Utc.timestamp_opt(at_secs, 0).unwrap(),
            aggregate_doc: None,
        }
    }

    #[test]
    fn test_page_orders_newest_first() {
        let store = MemoryStore::new();
        store.insert(&FeedScope::Aggregate, record("u1", "oldest", 100));
        store.insert(&FeedScope::Aggregate, record("u1", "middle", 200));
        store.insert(&FeedScope::Aggregate, record("u1", "newest", 300));

        let page = store
            .page(
                &FeedScope::Aggregate,
                &PageQuery {
                    after: None,
                    limit: 10,
                },
            )
            .unwrap();
        let bodies: Vec<&str> = page.items.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_page_resumes_after_cursor() {
        let store = MemoryStore::new();
        for i in 0..7 {
            store.insert(&FeedScope::Aggregate, record("u1", &format!("p{i}"), 100 + i));
        }

        let first = store
            .page(
                &FeedScope::Aggregate,
                &PageQuery {
                    after: None,
                    limit: 3,
                },
            )
            .unwrap();
        assert_eq!(first.items.len(), 3);

        let second = store
            .page(
                &FeedScope::Aggregate,
                &PageQuery {
                    after: first.next_cursor,
                    limit: 3,
                },
            )
            .unwrap();
        assert_eq!(second.items.len(), 3);

        // No overlap between consecutive pages
        for item in &second.items {
            assert!(first.items.iter().all(|p| p.id != item.id));
        }
    }

    #[test]
    fn test_equal_timestamps_break_ties_by_insertion_order() {
        let store = MemoryStore::new();
        store.insert(&FeedScope::Aggregate, record("u1", "first", 100));
        store.insert(&FeedScope::Aggregate, record("u1", "second", 100));

        let page = store
            .page(
                &FeedScope::Aggregate,
                &PageQuery {
                    after: None,
                    limit: 1,
                },
            )
            .unwrap();
        // Later insertion sorts newer
        assert_eq!(page.items[0].body, "second");

        let rest = store
            .page(
                &FeedScope::Aggregate,
                &PageQuery {
                    after: page.next_cursor,
                    limit: 1,
                },
            )
            .unwrap();
        assert_eq!(rest.items[0].body, "first");
    }

    #[test]
    fn test_fail_next_page_fails_once() {
        let store = MemoryStore::new();
        store.insert(&FeedScope::Aggregate, record("u1", "post", 100));
        store.fail_next_page();

        let query = PageQuery {
            after: None,
            limit: 5,
        };
        assert!(store.page(&FeedScope::Aggregate, &query).is_err());
        assert!(store.page(&FeedScope::Aggregate, &query).is_ok());
    }

    #[test]
    fn test_like_applies_to_both_copies() {
        let store = MemoryStore::new();
        let author = UserId::new("author");
        let agg = store.insert(&FeedScope::Aggregate, record("author", "hello", 100));
        let mut user_record = record("author", "hello", 100);
        user_record.aggregate_doc = Some(agg.clone());
        let feed = store.insert(&FeedScope::User(author.clone()), user_record);
        store.link_mirror(&agg, &feed).unwrap();

        let locations = PostLocations::mirrored(author.clone(), feed.clone(), agg.clone());
        let liker = UserId::new("fan");
        store
            .apply_like(&locations, &liker, LikeOp::Like)
            .unwrap();

        let from_agg = store.find(&FeedScope::Aggregate, &agg).unwrap();
        let from_user = store.find(&FeedScope::User(author), &feed).unwrap();
        assert_eq!(from_agg.like_count, 1);
        assert_eq!(from_user.like_count, 1);
        assert!(from_agg.is_liked_by(&liker));
        assert!(from_user.is_liked_by(&liker));
    }

    #[test]
    fn test_like_is_set_driven() {
        // A repeated Like for the same user must not double-count
        let store = MemoryStore::new();
        let agg = store.insert(&FeedScope::Aggregate, record("author", "hello", 100));
        let locations = PostLocations::aggregate_only(UserId::new("author"), agg.clone());
        let liker = UserId::new("fan");

        store.apply_like(&locations, &liker, LikeOp::Like).unwrap();
        store.apply_like(&locations, &liker, LikeOp::Like).unwrap();

        let post = store.find(&FeedScope::Aggregate, &agg).unwrap();
        assert_eq!(post.like_count, 1);
    }

    #[test]
    fn test_mirror_link_completes_aggregate_locations() {
        let store = MemoryStore::new();
        let author = UserId::new("author");
        let agg = store.insert(&FeedScope::Aggregate, record("author", "hello", 100));
        let mut user_record = record("author", "hello", 100);
        user_record.aggregate_doc = Some(agg.clone());
        let feed = store.insert(&FeedScope::User(author), user_record);

        let before = store.find(&FeedScope::Aggregate, &agg).unwrap();
        assert!(!before.locations.is_mirrored());

        store.link_mirror(&agg, &feed).unwrap();
        let after = store.find(&FeedScope::Aggregate, &agg).unwrap();
        assert!(after.locations.is_mirrored());
        assert_eq!(after.locations.feed_doc, Some(feed));
    }

    #[test]
    fn test_delete_removes_both_copies_and_comments() {
        let store = MemoryStore::new();
        let author = UserId::new("author");
        let agg = store.insert(&FeedScope::Aggregate, record("author", "bye", 100));
        let mut user_record = record("author", "bye", 100);
        user_record.aggregate_doc = Some(agg.clone());
        let feed = store.insert(&FeedScope::User(author.clone()), user_record);
        store.link_mirror(&agg, &feed).unwrap();

        let comment = Comment::new(
            DocId::random(),
            feed.clone(),
            UserId::new("fan"),
            "Fan".to_string(),
            None,
            "nice".to_string(),
        );
        store.append_comment(&author, &feed, comment);

        let locations = PostLocations::mirrored(author.clone(), feed.clone(), agg.clone());
        store.delete(&locations).unwrap();

        assert!(store.find(&FeedScope::Aggregate, &agg).is_none());
        assert!(store.find(&FeedScope::User(author.clone()), &feed).is_none());
        assert!(store.list_comments(&author, &feed).is_empty());
    }

    #[tokio::test]
    async fn test_comment_subscription_delivers_snapshot_then_updates() {
        let store = MemoryStore::new();
        let owner = UserId::new("author");
        let post = DocId::new("post-1");

        let first = Comment::new(
            DocId::random(),
            post.clone(),
            UserId::new("fan"),
            "Fan".to_string(),
            None,
            "first".to_string(),
        );
        store.append_comment(&owner, &post, first);

        let mut sub = store.subscribe_comments(&owner, &post);
        let snapshot = sub.next_snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);

        let second = Comment::new(
            DocId::random(),
            post.clone(),
            UserId::new("fan"),
            "Fan".to_string(),
            None,
            "second".to_string(),
        );
        store.append_comment(&owner, &post, second);
        let snapshot = sub.next_snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].body, "second");
    }

    #[tokio::test]
    async fn test_release_tears_down_listener() {
        let store = MemoryStore::new();
        let owner = UserId::new("author");
        let post = DocId::new("post-1");

        let sub = store.subscribe_comments(&owner, &post);
        assert_eq!(store.active_comment_listeners(&owner, &post), 1);

        sub.release();
        assert_eq!(store.active_comment_listeners(&owner, &post), 0);
    }

    #[test]
    fn test_profile_roundtrip() {
        let store = MemoryStore::new();
        let user = UserId::new("u1");
        assert!(store.find_profile(&user).is_none());

        store.upsert_profile(UserProfile::new(user.clone(), "Jordan"));
        store
            .update_profile(&user, |p| p.display_name = "Jordan B".to_string())
            .unwrap();

        let profile = store.find_profile(&user).unwrap();
        assert_eq!(profile.display_name, "Jordan B");

        let missing = store.update_profile(&UserId::new("nobody"), |_| {});
        assert!(matches!(missing, Err(DomainError::ProfileNotFound(_))));
    }
}
