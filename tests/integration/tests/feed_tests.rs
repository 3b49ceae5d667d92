//! Feed pagination flows over the full service stack

use std::collections::HashSet;

use birdie_core::{FeedScope, UserId};
use birdie_feed::{FeedPaginator, LoadOutcome, ScrollMetrics, SkipReason};
use integration_tests::{unique_user, TestEnv};

fn near_end() -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: 2_000.0,
        scroll_height: 2_400.0,
        client_height: 800.0,
    }
}

#[tokio::test]
async fn test_home_feed_scroll_through_twelve_posts() {
    let env = TestEnv::new();
    let author = unique_user("author");
    env.compose_many(&author, 12).await;

    let mut paginator = FeedPaginator::new(env.ctx.clone(), FeedScope::Aggregate);
    assert_eq!(paginator.load_initial().await.unwrap(), 5);

    assert_eq!(
        paginator.on_scroll(near_end()).await.unwrap(),
        LoadOutcome::Loaded { appended: 5 }
    );
    assert_eq!(
        paginator.on_scroll(near_end()).await.unwrap(),
        LoadOutcome::Loaded { appended: 2 }
    );
    assert_eq!(paginator.len(), 12);

    // One more fetch comes back empty and exhausts the feed
    assert_eq!(
        paginator.on_scroll(near_end()).await.unwrap(),
        LoadOutcome::Loaded { appended: 0 }
    );
    assert!(paginator.is_exhausted());

    // Window is newest first, no duplicates
    let stamps: Vec<_> = paginator.items().iter().map(|p| p.created_at).collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    let ids: HashSet<_> = paginator.items().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids.len(), 12);

    // And exhaustion holds
    assert_eq!(
        paginator.on_scroll(near_end()).await.unwrap(),
        LoadOutcome::Skipped(SkipReason::Exhausted)
    );
}

#[tokio::test]
async fn test_profile_feed_only_shows_own_posts() {
    let env = TestEnv::new();
    let author = unique_user("author");
    let other = unique_user("other");
    env.compose_many(&author, 3).await;
    env.compose_many(&other, 4).await;

    let mut paginator =
        FeedPaginator::new(env.ctx.clone(), FeedScope::User(author.id.clone()));
    paginator.load_initial().await.unwrap();
    while !paginator.is_exhausted() {
        paginator.load_next_page().await.unwrap();
    }

    assert_eq!(paginator.len(), 3);
    assert!(paginator
        .items()
        .iter()
        .all(|p| p.author_id == author.id));
}

#[tokio::test]
async fn test_fetch_failure_halts_until_next_trigger() {
    let env = TestEnv::new();
    let author = unique_user("author");
    env.compose_many(&author, 8).await;

    let mut paginator = FeedPaginator::new(env.ctx.clone(), FeedScope::Aggregate);
    paginator.load_initial().await.unwrap();

    env.store.fail_next_page();
    assert!(paginator.on_scroll(near_end()).await.is_err());
    assert!(!paginator.is_loading());
    assert_eq!(paginator.len(), 5);

    assert_eq!(
        paginator.on_scroll(near_end()).await.unwrap(),
        LoadOutcome::Loaded { appended: 3 }
    );
    assert_eq!(paginator.len(), 8);
}

#[tokio::test]
async fn test_reload_picks_up_posts_composed_meanwhile() {
    let env = TestEnv::new();
    let author = unique_user("author");
    env.compose_many(&author, 2).await;

    let mut paginator = FeedPaginator::new(env.ctx.clone(), FeedScope::Aggregate);
    assert_eq!(paginator.load_initial().await.unwrap(), 2);

    let fresh = env.compose(&author, "hole in one!").await;

    // A remount reloads from the top and sees the new post first
    assert_eq!(paginator.load_initial().await.unwrap(), 3);
    assert_eq!(paginator.items()[0].id, fresh.locations.aggregate_doc.unwrap());
}

#[tokio::test]
async fn test_view_reflects_viewer_likes() {
    let env = TestEnv::new();
    let author = unique_user("author");
    let viewer = UserId::new("viewer");
    let post = env.compose(&author, "on the green").await;

    env.ctx
        .post_repo()
        .apply_like(&post.locations, &viewer, birdie_core::LikeOp::Like)
        .await
        .unwrap();

    let mut paginator = FeedPaginator::new(env.ctx.clone(), FeedScope::Aggregate);
    paginator.load_initial().await.unwrap();

    let view = paginator.view(&viewer);
    assert_eq!(view.posts.len(), 1);
    assert!(view.posts[0].liked_by_me);
    assert_eq!(view.posts[0].like_count, 1);

    let stranger_view = paginator.view(&UserId::new("stranger"));
    assert!(!stranger_view.posts[0].liked_by_me);
}
