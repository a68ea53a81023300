//! Generator module - renders site pages from the current post snapshot

use anyhow::Result;
use tera::Context;

use crate::cms::FetchState;
use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, Post};
use crate::selection::{DetailView, ScrollLock, SelectionController};
use crate::templates::{ConfigData, MenuItemData, NavPost, PostView, TemplateRenderer};

/// Seconds before a loading page reloads itself
const LOADING_REFRESH_SECS: u32 = 2;

/// How a rendered page should be reported to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    Loading,
    NotFound,
    Error,
}

/// A rendered HTML page
#[derive(Debug, Clone)]
pub struct Page {
    pub status: PageStatus,
    pub html: String,
}

/// Renders pages with the built-in Tera templates
pub struct Generator {
    config: SiteConfig,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new().with_raw_html(config.display.allow_raw_html),
        })
    }

    /// Landing page with the most recent posts
    pub fn home(&self, posts: &FetchState) -> Result<Page> {
        let mut context = self.base_context("/", false);

        let recent: Vec<PostView> = posts
            .posts()
            .unwrap_or_default()
            .iter()
            .take(self.config.display.home_posts)
            .map(|p| self.view(p))
            .collect();

        context.insert("posts", &recent);
        context.insert("loading", &posts.is_loading());
        context.insert("error", &posts.error());

        Ok(Page {
            status: PageStatus::Ok,
            html: self.renderer.render("home.html", &context)?,
        })
    }

    /// Post listing, optionally with one post opened in the overlay
    ///
    /// `open` is the slug of the clicked card.
    pub fn blog(&self, posts: &FetchState, open: Option<&str>) -> Result<Page> {
        let list = match posts {
            FetchState::Loading => return self.loading("/blog"),
            FetchState::Failure(message) => return self.error("/blog", message),
            FetchState::Success(list) => list,
        };

        let lock = ScrollLock::new();
        let mut selection = SelectionController::with_scroll_lock(lock.clone());
        if let Some(post) = open.and_then(|slug| Post::find_by_slug(list, slug)) {
            selection.select_by_click(post.clone());
        }

        let views: Vec<PostView> = list.iter().map(|p| self.view(p)).collect();
        let mut views = views.into_iter();
        let hero = views.next();
        let others: Vec<PostView> = views.collect();

        let mut context = self.base_context("/blog", lock.is_locked());
        context.insert("hero", &hero);
        context.insert("others", &others);
        context.insert("overlay", &selection.selected().map(|p| self.view(p)));

        Ok(Page {
            status: PageStatus::Ok,
            html: self.renderer.render("blog.html", &context)?,
        })
    }

    /// Route-based detail page for `slug`
    pub fn post(&self, posts: &FetchState, slug: &str) -> Result<Page> {
        let current = crate::helpers::post_path(slug);

        let mut selection = SelectionController::new();
        selection.set_route_slug(Some(slug.to_string()));
        selection.set_posts(posts.clone());

        let post = match selection.detail_view() {
            DetailView::Loading => return self.loading(&current),
            DetailView::Error(message) => return self.error(&current, message),
            DetailView::NotFound => return self.not_found(&current),
            DetailView::Post(post) => post,
        };

        let list = posts.posts().unwrap_or_default();
        let mut context = self.base_context(&current, false);
        context.insert("post", &self.view(post));
        context.insert("prev", &post.prev(list).map(NavPost::from));
        context.insert("next", &post.next(list).map(NavPost::from));

        Ok(Page {
            status: PageStatus::Ok,
            html: self.renderer.render("post.html", &context)?,
        })
    }

    /// Page for an unknown post
    pub fn not_found(&self, current: &str) -> Result<Page> {
        self.status_page(current, PageStatus::NotFound, "not-found", "Post not found.")
    }

    fn loading(&self, current: &str) -> Result<Page> {
        self.status_page(current, PageStatus::Loading, "loading", "Loading posts...")
    }

    fn error(&self, current: &str, message: &str) -> Result<Page> {
        self.status_page(current, PageStatus::Error, "error", message)
    }

    fn status_page(
        &self,
        current: &str,
        status: PageStatus,
        kind: &str,
        message: &str,
    ) -> Result<Page> {
        let mut context = self.base_context(current, false);
        context.insert("kind", kind);
        context.insert("message", message);
        if status == PageStatus::Loading {
            context.insert("refresh", &LOADING_REFRESH_SECS);
        }

        Ok(Page {
            status,
            html: self.renderer.render("status.html", &context)?,
        })
    }

    /// Context shared by every page
    fn base_context(&self, current: &str, scroll_locked: bool) -> Context {
        let mut context = Context::new();
        context.insert("config", &ConfigData::from(&self.config));
        context.insert("menu", &MenuItemData::build(&self.config.menu, current));
        context.insert("scroll_locked", &scroll_locked);
        context.insert("refresh", &0);
        context
    }

    fn view(&self, post: &Post) -> PostView {
        PostView::new(post, &self.config.display, &self.markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn generator() -> Generator {
        let mut config = SiteConfig::default();
        config.title = "Test Blog".to_string();
        Generator::new(&config).unwrap()
    }

    fn loaded() -> FetchState {
        let mut a = Post::new(1, "First Post", "first");
        a.summary = "The first one".to_string();
        a.date = Some("2024-01-01".to_string());
        let mut b = Post::new(2, "Second Post", "second");
        b.content = Some("Body of **second**".to_string());
        let c = Post::new(3, "Third Post", "third");
        FetchState::Success(Arc::from(vec![a, b, c]))
    }

    #[test]
    fn test_home_lists_recent_posts() {
        let page = generator().home(&loaded()).unwrap();
        assert_eq!(page.status, PageStatus::Ok);
        assert!(page.html.contains("Test Blog"));
        assert!(page.html.contains("First Post"));
        assert!(page.html.contains("Third Post"));
    }

    #[test]
    fn test_home_while_loading_and_failed() {
        let page = generator().home(&FetchState::Loading).unwrap();
        assert!(page.html.contains("Loading posts..."));

        let page = generator()
            .home(&FetchState::Failure("CMS down".to_string()))
            .unwrap();
        assert!(page.html.contains("CMS down"));
    }

    #[test]
    fn test_blog_listing_without_overlay() {
        let page = generator().blog(&loaded(), None).unwrap();
        assert_eq!(page.status, PageStatus::Ok);
        assert!(page.html.contains("First Post"));
        assert!(page.html.contains("Second Post"));
        assert!(!page.html.contains("overlay-body"));
        assert!(!page.html.contains("scroll-locked"));
    }

    #[test]
    fn test_blog_listing_with_overlay() {
        let page = generator().blog(&loaded(), Some("second")).unwrap();
        assert!(page.html.contains("overlay-body"));
        assert!(page.html.contains("<strong>second</strong>"));
        assert!(page.html.contains("scroll-locked"));
    }

    #[test]
    fn test_blog_unknown_overlay_slug() {
        let page = generator().blog(&loaded(), Some("nope")).unwrap();
        assert_eq!(page.status, PageStatus::Ok);
        assert!(!page.html.contains("overlay-body"));
        assert!(!page.html.contains("scroll-locked"));
    }

    #[test]
    fn test_blog_states() {
        let page = generator().blog(&FetchState::Loading, None).unwrap();
        assert_eq!(page.status, PageStatus::Loading);
        assert!(page.html.contains("http-equiv=\"refresh\""));

        let page = generator()
            .blog(&FetchState::Failure("CMS down".to_string()), None)
            .unwrap();
        assert_eq!(page.status, PageStatus::Error);
        assert!(page.html.contains("CMS down"));

        let page = generator()
            .blog(&FetchState::Success(Arc::from(Vec::new())), None)
            .unwrap();
        assert!(page.html.contains("No posts yet."));
    }

    #[test]
    fn test_post_page() {
        let page = generator().post(&loaded(), "second").unwrap();
        assert_eq!(page.status, PageStatus::Ok);
        assert!(page.html.contains("Second Post"));
        assert!(page.html.contains("unknown"));
        assert!(page.html.contains("no date"));
        assert!(page.html.contains("5 min"));
        // Neighbours in source order
        assert!(page.html.contains("First Post"));
        assert!(page.html.contains("Third Post"));
        assert!(!page.html.contains("scroll-locked"));
    }

    #[test]
    fn test_post_page_states() {
        let page = generator().post(&loaded(), "missing").unwrap();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("Post not found."));

        let page = generator().post(&FetchState::Loading, "first").unwrap();
        assert_eq!(page.status, PageStatus::Loading);

        let page = generator()
            .post(&FetchState::Failure("CMS down".to_string()), "first")
            .unwrap();
        assert_eq!(page.status, PageStatus::Error);
    }

    #[test]
    fn test_raw_html_follows_display_config() {
        let mut post = Post::new(1, "Raw", "raw");
        post.content = Some("<div class=\"note\">hi</div>".to_string());
        let posts = FetchState::Success(Arc::from(vec![post]));

        let page = generator().post(&posts, "raw").unwrap();
        assert!(!page.html.contains("<div class=\"note\">"));

        let mut config = SiteConfig::default();
        config.display.allow_raw_html = true;
        let page = Generator::new(&config).unwrap().post(&posts, "raw").unwrap();
        assert!(page.html.contains("<div class=\"note\">"));
    }

    #[test]
    fn test_escapes_cms_text() {
        let posts = FetchState::Success(Arc::from(vec![Post::new(1, "<b>x</b>", "x")]));
        let page = generator().post(&posts, "x").unwrap();
        assert!(!page.html.contains("<b>x</b>"));
        assert!(page.html.contains("&lt;b&gt;x&lt;&#x2F;b&gt;"));
    }
}
