//! Show a single post by slug

use anyhow::Result;
use std::sync::Arc;

use crate::cms::{CmsClient, PostRepository};
use crate::content::MarkdownRenderer;
use crate::selection::{DetailView, SelectionController};
use crate::templates::PostView;
use crate::Blog;

/// Look a post up by slug and print it
///
/// The slug is set before the fetch cycle starts; the lookup is re-run
/// every time the repository publishes a new state.
pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    let repository = PostRepository::new(Arc::new(CmsClient::new(&blog.config.cms)?));
    let mut updates = repository.subscribe();

    let mut selection = SelectionController::new();
    selection.set_route_slug(Some(slug.to_string()));

    let cycle = repository.activate();
    loop {
        let state = updates.borrow_and_update().clone();
        selection.set_posts(state);
        if !selection.is_pending() || updates.changed().await.is_err() {
            break;
        }
    }
    cycle.await?;

    match selection.detail_view() {
        DetailView::Post(post) => {
            let markdown =
                MarkdownRenderer::new().with_raw_html(blog.config.display.allow_raw_html);
            let view = PostView::new(post, &blog.config.display, &markdown);
            println!("{}", view.title);
            println!("{}", "=".repeat(view.title.chars().count()));
            println!("Author: {}", view.author);
            println!("Date: {}", view.date);
            println!("Reading time: {}", view.read_time);
            println!("Link: {}", view.path);
            println!();
            println!("{}", view.summary);
            println!();
            let body = post
                .content
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(&blog.config.display.content_fallback);
            println!("{}", body);
        }
        DetailView::NotFound => {
            println!("Post not found: {}", slug);
        }
        DetailView::Error(message) => anyhow::bail!(message.to_string()),
        DetailView::Loading => anyhow::bail!("posts are still loading"),
    }

    Ok(())
}
