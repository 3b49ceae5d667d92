//! Feed paginator
//!
//! Incremental, cursor-based loading for a mounted feed. Pages are fetched
//! in store order (newest first), deduplicated by document id, and appended
//! to the in-memory window. Fetches are triggered by scroll proximity and at
//! most one is in flight at a time; once the store returns an empty page the
//! feed is exhausted and stays that way for the life of the paginator.

use std::collections::HashSet;

use tracing::{info, instrument, warn};

use birdie_core::{DocId, FeedPage, FeedScope, PageCursor, PageQuery, PostSummary, UserId};

use crate::dto::{FeedView, PostView};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Scroll position of the feed viewport, as reported by the renderer
#[derive(Debug, Clone, Copy)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Whether the viewport is within `threshold` viewport heights of the
    /// end of the scrolled content
    pub fn near_end(&self, threshold: f64) -> bool {
        self.scroll_top + self.client_height * threshold >= self.scroll_height
    }
}

/// Why a scroll event did not trigger a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The initial load has not completed yet
    NotPrimed,
    /// A fetch is already in flight
    InFlight,
    /// The feed has no more pages
    Exhausted,
    /// The viewport is not close enough to the end
    FarFromEnd,
}

/// Result of a pagination trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched; `appended` items survived deduplication
    Loaded { appended: usize },
    /// No fetch was started
    Skipped(SkipReason),
}

/// Stateful paginator for one mounted feed
pub struct FeedPaginator {
    ctx: ServiceContext,
    scope: FeedScope,
    items: Vec<PostSummary>,
    seen: HashSet<DocId>,
    cursor: Option<PageCursor>,
    loading: bool,
    exhausted: bool,
    primed: bool,
    empty: bool,
}

impl FeedPaginator {
    /// Create a paginator for a feed scope. Nothing is fetched until
    /// [`load_initial`](Self::load_initial) runs.
    pub fn new(ctx: ServiceContext, scope: FeedScope) -> Self {
        Self {
            ctx,
            scope,
            items: Vec::new(),
            seen: HashSet::new(),
            cursor: None,
            loading: false,
            exhausted: false,
            primed: false,
            empty: false,
        }
    }

    /// Fetch the first page, resetting any previous window.
    ///
    /// Until this succeeds once, scroll events are ignored.
    #[instrument(skip(self), fields(scope = %self.scope))]
    pub async fn load_initial(&mut self) -> ServiceResult<usize> {
        self.items.clear();
        self.seen.clear();
        self.cursor = None;
        self.exhausted = false;
        self.primed = false;
        self.empty = false;

        self.loading = true;
        let result = self.fetch_page(None).await;
        self.loading = false;

        let page = result?;
        let fetched = page.items.len();
        let appended = self.append_page(page);
        self.primed = true;
        self.empty = self.items.is_empty();
        if fetched == 0 {
            self.exhausted = true;
        }

        info!(appended, exhausted = self.exhausted, "Initial feed page loaded");
        Ok(appended)
    }

    /// React to a scroll event: fetch the next page when the viewport is
    /// near the end and nothing else blocks the fetch
    #[instrument(skip(self), fields(scope = %self.scope))]
    pub async fn on_scroll(&mut self, metrics: ScrollMetrics) -> ServiceResult<LoadOutcome> {
        if !self.primed {
            return Ok(LoadOutcome::Skipped(SkipReason::NotPrimed));
        }
        if self.exhausted {
            return Ok(LoadOutcome::Skipped(SkipReason::Exhausted));
        }
        if self.loading {
            return Ok(LoadOutcome::Skipped(SkipReason::InFlight));
        }
        if !metrics.near_end(self.ctx.feed_config().scroll_threshold) {
            return Ok(LoadOutcome::Skipped(SkipReason::FarFromEnd));
        }
        self.load_next_page().await
    }

    /// Fetch the page after the current cursor.
    ///
    /// On failure the cursor and window are untouched and the in-flight
    /// flag is cleared, so a later trigger retries the same page.
    #[instrument(skip(self), fields(scope = %self.scope))]
    pub async fn load_next_page(&mut self) -> ServiceResult<LoadOutcome> {
        if self.exhausted {
            return Ok(LoadOutcome::Skipped(SkipReason::Exhausted));
        }
        if self.loading {
            return Ok(LoadOutcome::Skipped(SkipReason::InFlight));
        }

        self.loading = true;
        let result = self.fetch_page(self.cursor.clone()).await;
        self.loading = false;

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, "Feed page fetch failed");
                return Err(err);
            }
        };

        let fetched = page.items.len();
        let appended = self.append_page(page);
        if fetched == 0 {
            self.exhausted = true;
        }

        info!(appended, exhausted = self.exhausted, "Feed page loaded");
        Ok(LoadOutcome::Loaded { appended })
    }

    async fn fetch_page(&self, after: Option<PageCursor>) -> ServiceResult<FeedPage> {
        let query = PageQuery {
            after,
            limit: self.page_size(),
        };
        Ok(self.ctx.post_repo().page(&self.scope, query).await?)
    }

    /// Append a fetched page, skipping documents already in the window.
    /// The cursor always advances to the end of the fetched page, even when
    /// every item was a duplicate.
    fn append_page(&mut self, page: FeedPage) -> usize {
        let mut appended = 0;
        for item in page.items {
            if self.seen.insert(item.id.clone()) {
                self.items.push(item);
                appended += 1;
            }
        }
        if page.next_cursor.is_some() {
            self.cursor = page.next_cursor;
        }
        appended
    }

    /// Render the current window for a viewing user
    pub fn view(&self, viewer: &UserId) -> FeedView {
        FeedView {
            posts: self
                .items
                .iter()
                .map(|post| PostView::from_summary(post, viewer))
                .collect(),
            is_loading_more: self.loading,
            is_exhausted: self.exhausted,
            is_empty: self.empty,
        }
    }

    /// Posts currently in the window, in display order
    pub fn items(&self) -> &[PostSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn page_size(&self) -> usize {
        self.ctx.feed_config().page_size
    }
}

impl std::fmt::Debug for FeedPaginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedPaginator")
            .field("scope", &self.scope)
            .field("items", &self.items.len())
            .field("loading", &self.loading)
            .field("exhausted", &self.exhausted)
            .field("primed", &self.primed)
            .finish_non_exhaustive()
    }
}
