//! Post interaction flows over the full service stack

use birdie_core::{FeedScope, LikeOp, UserId};
use birdie_feed::{FeedPaginator, PostInteractionTracker};
use integration_tests::{unique_user, TestEnv};

#[tokio::test]
async fn test_like_toggle_from_the_home_feed() {
    let env = TestEnv::new();
    let author = unique_user("author");
    let post = env.compose(&author, "crushed it off the tee").await;

    // Three earlier likes
    for user in ["a", "b", "c"] {
        env.ctx
            .post_repo()
            .apply_like(&post.locations, &UserId::new(user), LikeOp::Like)
            .await
            .unwrap();
    }

    // Viewer opens the home feed and likes the post
    let mut paginator = FeedPaginator::new(env.ctx.clone(), FeedScope::Aggregate);
    paginator.load_initial().await.unwrap();
    let from_feed = paginator.items()[0].clone();

    let viewer = unique_user("dana");
    let mut tracker = PostInteractionTracker::new(env.ctx.clone(), from_feed, viewer.clone())
        .await
        .unwrap();

    assert_eq!(tracker.toggle_like().await.unwrap(), LikeOp::Like);
    assert_eq!(tracker.post().like_count, 4);

    // The author's copy of the record agrees
    let own_copy = env
        .ctx
        .post_repo()
        .find(
            &FeedScope::User(author.id.clone()),
            post.locations.feed_doc.as_ref().unwrap(),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(own_copy.like_count, 4);
    assert!(own_copy.is_liked_by(&viewer.id));

    assert_eq!(tracker.toggle_like().await.unwrap(), LikeOp::Unlike);
    assert_eq!(tracker.post().like_count, 3);
}

#[tokio::test]
async fn test_two_viewers_share_one_comment_thread() {
    let env = TestEnv::new();
    let author = unique_user("author");
    let post = env.compose(&author, "bunker escape").await;

    let dana = unique_user("dana");
    let eli = unique_user("eli");
    let mut dana_tracker =
        PostInteractionTracker::new(env.ctx.clone(), post.clone(), dana.clone())
            .await
            .unwrap();
    let mut eli_tracker = PostInteractionTracker::new(env.ctx.clone(), post, eli.clone())
        .await
        .unwrap();

    // Both see the empty initial snapshot
    assert!(dana_tracker.sync_comments().await.unwrap());
    assert!(eli_tracker.sync_comments().await.unwrap());

    // Dana comments; Eli's live subscription delivers it
    let id = dana_tracker.add_comment("what a recovery").await.unwrap();
    assert!(id.is_some());
    assert!(dana_tracker.comments_expanded());

    assert!(eli_tracker.sync_comments().await.unwrap());
    assert_eq!(eli_tracker.comments().len(), 1);
    assert_eq!(eli_tracker.comments()[0].body, "what a recovery");
    assert_eq!(
        eli_tracker.comments()[0].author_display_name,
        dana.display_name
    );
}

#[tokio::test]
async fn test_blank_comment_never_reaches_the_store() {
    let env = TestEnv::new();
    let author = unique_user("author");
    let post = env.compose(&author, "practice range").await;
    let owner = post.locations.author.clone();
    let doc = post.locations.comment_doc().cloned().unwrap();

    let viewer = unique_user("dana");
    let mut tracker = PostInteractionTracker::new(env.ctx.clone(), post, viewer)
        .await
        .unwrap();

    assert!(tracker.add_comment("   ").await.is_err());
    assert!(env
        .ctx
        .comment_repo()
        .list(&owner, &doc)
        .await
        .unwrap()
        .is_empty());
    assert!(!tracker.comments_expanded());
}

#[tokio::test]
async fn test_delete_is_author_only_and_cleans_up() {
    let env = TestEnv::new();
    let author = unique_user("author");
    let post = env.compose(&author, "farewell post").await;
    let agg_doc = post.locations.aggregate_doc.clone().unwrap();

    // A non-author is rejected up front
    let intruder = unique_user("intruder");
    let tracker = PostInteractionTracker::new(env.ctx.clone(), post.clone(), intruder)
        .await
        .unwrap();
    assert_eq!(
        tracker.delete().await.unwrap_err().error_code(),
        "NOT_POST_AUTHOR"
    );
    assert!(env
        .ctx
        .post_repo()
        .find(&FeedScope::Aggregate, &agg_doc)
        .await
        .unwrap()
        .is_some());

    // The author succeeds, and the feed no longer shows the post
    let tracker = PostInteractionTracker::new(env.ctx.clone(), post, author.clone())
        .await
        .unwrap();
    tracker.delete().await.unwrap();

    let mut paginator = FeedPaginator::new(env.ctx.clone(), FeedScope::Aggregate);
    assert_eq!(paginator.load_initial().await.unwrap(), 0);

    let mut own_feed = FeedPaginator::new(env.ctx.clone(), FeedScope::User(author.id));
    assert_eq!(own_feed.load_initial().await.unwrap(), 0);
}

#[tokio::test]
async fn test_comment_counts_stay_in_sync_across_copies() {
    let env = TestEnv::new();
    let author = unique_user("author");
    let post = env.compose(&author, "course review").await;
    let feed_doc = post.locations.feed_doc.clone().unwrap();
    let agg_doc = post.locations.aggregate_doc.clone().unwrap();

    let viewer = unique_user("dana");
    let mut tracker = PostInteractionTracker::new(env.ctx.clone(), post, viewer)
        .await
        .unwrap();
    tracker.add_comment("great greens").await.unwrap();
    tracker.add_comment("slow back nine").await.unwrap();

    let from_agg = env
        .ctx
        .post_repo()
        .find(&FeedScope::Aggregate, &agg_doc)
        .await
        .unwrap()
        .unwrap();
    let from_user = env
        .ctx
        .post_repo()
        .find(&FeedScope::User(author.id), &feed_doc)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(from_agg.comment_count, 2);
    assert_eq!(from_user.comment_count, 2);
}
