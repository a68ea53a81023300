//! Selection module - which post is currently on display
//!
//! A post can be opened two ways: explicitly (a click on a card in the
//! listing) or through the `slug` route parameter. The route lookup depends
//! on the repository snapshot, which arrives independently, so the lookup
//! is re-run whenever either input changes.

mod scroll_lock;

pub use scroll_lock::{ScrollLock, ScrollLockGuard};

use crate::cms::FetchState;
use crate::content::Post;

/// Currently displayed post
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(Post),
}

/// Outcome of looking a slug up in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugLookup {
    /// A post with this slug is selected
    Found,
    /// The repository has not resolved yet
    Pending,
    /// The repository resolved and nothing matched
    NotFound,
}

/// What a route-based detail view should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView<'a> {
    Loading,
    Error(&'a str),
    NotFound,
    Post(&'a Post),
}

/// Tracks the single post shown in the overlay or detail view
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    route_slug: Option<String>,
    posts: FetchState,
    lookup: Option<SlugLookup>,
    scroll_lock: Option<ScrollLock>,
    guard: Option<ScrollLockGuard>,
}

impl SelectionController {
    /// Controller for a full page view, which never locks scrolling
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller for an overlay: `lock` is held while a post is selected
    pub fn with_scroll_lock(lock: ScrollLock) -> Self {
        Self {
            scroll_lock: Some(lock),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&Post> {
        match &self.state {
            SelectionState::Selected(post) => Some(post),
            SelectionState::Idle => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SelectionState::Selected(_))
    }

    /// Result of the latest route lookup, if a route slug is set
    pub fn lookup(&self) -> Option<SlugLookup> {
        self.lookup
    }

    /// Open a post, replacing any open one
    pub fn select_by_click(&mut self, post: Post) {
        tracing::debug!("Selected post '{}' by click", post.slug);
        self.transition(SelectionState::Selected(post));
    }

    /// Close the open post; a no-op when nothing is open
    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("Closed selection");
        }
        self.transition(SelectionState::Idle);
    }

    /// Select the post with `slug` from `posts`
    ///
    /// While `posts` is still loading the current state is kept and
    /// `Pending` is returned. A resolved snapshot without a match clears
    /// the selection.
    pub fn select_by_slug(&mut self, slug: &str, posts: &FetchState) -> SlugLookup {
        let found = match posts {
            FetchState::Loading => return SlugLookup::Pending,
            FetchState::Failure(_) => None,
            FetchState::Success(posts) => Post::find_by_slug(posts, slug).cloned(),
        };

        match found {
            Some(post) => {
                tracing::debug!("Selected post '{}' by route", slug);
                self.transition(SelectionState::Selected(post));
                SlugLookup::Found
            }
            None => {
                tracing::debug!("No post with slug '{}'", slug);
                self.transition(SelectionState::Idle);
                SlugLookup::NotFound
            }
        }
    }

    /// Update the route parameter and re-run the lookup
    ///
    /// Leaving the route closes the post it had selected.
    pub fn set_route_slug(&mut self, slug: Option<String>) {
        let left_route = slug.is_none() && self.route_slug.is_some();
        self.route_slug = slug;
        if left_route {
            self.close();
        }
        self.reconcile();
    }

    /// Update the repository snapshot and re-run the lookup
    pub fn set_posts(&mut self, posts: FetchState) {
        self.posts = posts;
        self.reconcile();
    }

    /// Whether the route lookup is waiting for the repository
    pub fn is_pending(&self) -> bool {
        self.lookup == Some(SlugLookup::Pending)
    }

    /// Display state for a route-based detail view
    pub fn detail_view(&self) -> DetailView<'_> {
        match &self.posts {
            FetchState::Loading => DetailView::Loading,
            FetchState::Failure(message) => DetailView::Error(message),
            FetchState::Success(_) => match &self.state {
                SelectionState::Selected(post) => DetailView::Post(post),
                SelectionState::Idle => DetailView::NotFound,
            },
        }
    }

    fn reconcile(&mut self) {
        self.lookup = match self.route_slug.clone() {
            Some(slug) => {
                let posts = self.posts.clone();
                Some(self.select_by_slug(&slug, &posts))
            }
            None => None,
        };
    }

    fn transition(&mut self, next: SelectionState) {
        match next {
            SelectionState::Selected(_) => {
                if self.guard.is_none() {
                    self.guard = self.scroll_lock.as_ref().map(ScrollLock::acquire);
                }
            }
            SelectionState::Idle => {
                self.guard = None;
            }
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn post(id: i64, slug: &str) -> Post {
        Post::new(id, slug.to_uppercase(), slug)
    }

    fn loaded(posts: Vec<Post>) -> FetchState {
        FetchState::Success(Arc::from(posts))
    }

    #[test]
    fn test_starts_idle() {
        let controller = SelectionController::new();
        assert_eq!(controller.state(), &SelectionState::Idle);
        assert!(!controller.is_open());
        assert!(controller.lookup().is_none());
    }

    #[test]
    fn test_click_replaces_selection() {
        let mut controller = SelectionController::new();
        controller.select_by_click(post(1, "a"));
        controller.select_by_click(post(2, "b"));

        assert_eq!(controller.state(), &SelectionState::Selected(post(2, "b")));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut controller = SelectionController::new();
        controller.select_by_click(post(1, "a"));

        controller.close();
        assert_eq!(controller.state(), &SelectionState::Idle);
        controller.close();
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_select_by_slug() {
        let posts = loaded(vec![post(1, "a"), post(2, "b")]);
        let mut controller = SelectionController::new();

        assert_eq!(controller.select_by_slug("b", &posts), SlugLookup::Found);
        assert_eq!(controller.selected().map(|p| p.id), Some(2));

        assert_eq!(controller.select_by_slug("z", &posts), SlugLookup::NotFound);
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_select_by_slug_before_and_after_data() {
        let mut controller = SelectionController::new();

        assert_eq!(
            controller.select_by_slug("b", &FetchState::Loading),
            SlugLookup::Pending
        );
        assert_eq!(
            controller.select_by_slug("b", &loaded(Vec::new())),
            SlugLookup::NotFound
        );

        let posts = loaded(vec![post(1, "a"), post(2, "b")]);
        assert_eq!(controller.select_by_slug("b", &posts), SlugLookup::Found);
        assert_eq!(controller.selected().map(|p| p.id), Some(2));
    }

    #[test]
    fn test_route_slug_resolves_when_posts_arrive() {
        let mut controller = SelectionController::new();
        controller.set_route_slug(Some("b".to_string()));
        assert!(controller.is_pending());
        assert_eq!(controller.detail_view(), DetailView::Loading);

        controller.set_posts(loaded(vec![post(1, "a"), post(2, "b")]));
        assert_eq!(controller.lookup(), Some(SlugLookup::Found));
        assert_eq!(controller.detail_view(), DetailView::Post(&post(2, "b")));
    }

    #[test]
    fn test_posts_then_route_slug() {
        let mut controller = SelectionController::new();
        controller.set_posts(loaded(vec![post(1, "a"), post(2, "b")]));
        assert!(controller.lookup().is_none());

        controller.set_route_slug(Some("a".to_string()));
        assert_eq!(controller.selected().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_latest_input_wins() {
        let mut controller = SelectionController::new();
        controller.set_route_slug(Some("a".to_string()));
        controller.set_posts(loaded(vec![post(1, "a"), post(2, "b")]));
        assert_eq!(controller.selected().map(|p| p.id), Some(1));

        controller.set_route_slug(Some("b".to_string()));
        assert_eq!(controller.selected().map(|p| p.id), Some(2));

        // A fresh snapshot without "b" replaces the stale match
        controller.set_posts(loaded(vec![post(1, "a")]));
        assert_eq!(controller.detail_view(), DetailView::NotFound);
    }

    #[test]
    fn test_leaving_route_closes_its_selection() {
        let lock = ScrollLock::new();
        let mut controller = SelectionController::with_scroll_lock(lock.clone());
        controller.set_posts(loaded(vec![post(1, "a")]));
        controller.set_route_slug(Some("a".to_string()));
        assert!(controller.is_open());
        assert!(lock.is_locked());

        controller.set_route_slug(None);
        assert_eq!(controller.state(), &SelectionState::Idle);
        assert!(controller.lookup().is_none());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_click_without_route_survives_clearing_route() {
        let mut controller = SelectionController::new();
        controller.select_by_click(post(1, "a"));
        controller.set_route_slug(None);
        assert!(controller.is_open());
    }

    #[test]
    fn test_failure_detail_view() {
        let mut controller = SelectionController::new();
        controller.set_route_slug(Some("a".to_string()));
        controller.set_posts(FetchState::Failure("boom".to_string()));

        assert_eq!(controller.lookup(), Some(SlugLookup::NotFound));
        assert_eq!(controller.detail_view(), DetailView::Error("boom"));
    }

    #[test]
    fn test_scroll_lock_follows_selection() {
        let lock = ScrollLock::new();
        let mut controller = SelectionController::with_scroll_lock(lock.clone());
        assert!(!lock.is_locked());

        controller.select_by_click(post(1, "a"));
        assert!(lock.is_locked());
        controller.select_by_click(post(2, "b"));
        assert!(lock.is_locked());

        controller.close();
        assert!(!lock.is_locked());
        controller.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_scroll_lock_released_by_route_miss() {
        let lock = ScrollLock::new();
        let mut controller = SelectionController::with_scroll_lock(lock.clone());
        let posts = loaded(vec![post(1, "a")]);

        controller.select_by_slug("a", &posts);
        assert!(lock.is_locked());
        controller.select_by_slug("z", &posts);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_scroll_lock_released_on_teardown() {
        let lock = ScrollLock::new();
        {
            let mut controller = SelectionController::with_scroll_lock(lock.clone());
            controller.select_by_click(post(1, "a"));
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_page_controller_never_locks() {
        let mut controller = SelectionController::new();
        controller.select_by_click(post(1, "a"));
        assert!(controller.is_open());
        assert!(controller.guard.is_none());
    }
}
