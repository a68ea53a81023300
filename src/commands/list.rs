//! List posts published in the CMS

use anyhow::Result;
use std::sync::Arc;

use crate::cms::{CmsClient, FetchState, PostRepository};
use crate::content::Post;
use crate::helpers::format_date;
use crate::Blog;

/// Run one fetch cycle and print every post
pub async fn run(blog: &Blog) -> Result<()> {
    let repository = PostRepository::new(Arc::new(CmsClient::new(&blog.config.cms)?));

    match repository.fetch_all().await {
        FetchState::Success(posts) => {
            println!("Posts ({}):", posts.len());
            for post in posts.iter() {
                println!("  {}", format_line(post, &blog.config.display.missing_date));
            }
        }
        FetchState::Failure(message) => anyhow::bail!(message),
        FetchState::Loading => anyhow::bail!("posts are still loading"),
    }

    Ok(())
}

/// One listing line: `date - title [slug]`
fn format_line(post: &Post, missing_date: &str) -> String {
    let date = post
        .date
        .as_deref()
        .map(|d| format_date(d, "YYYY-MM-DD"))
        .unwrap_or_else(|| missing_date.to_string());
    format!("{} - {} [{}]", date, post.title, post.slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let mut post = Post::new(1, "Hello", "hello");
        assert_eq!(format_line(&post, "no date"), "no date - Hello [hello]");

        post.date = Some("2024-01-15T10:30:00.000Z".to_string());
        assert_eq!(format_line(&post, "no date"), "2024-01-15 - Hello [hello]");
    }
}
