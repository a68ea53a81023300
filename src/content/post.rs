//! Post model

use serde::{Deserialize, Serialize};

/// A blog post as normalized from the CMS
///
/// Optional fields are left empty here; display fallbacks are applied by
/// the templates layer, never by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// CMS-assigned identifier
    pub id: i64,

    /// Post title
    pub title: String,

    /// Short teaser shown on cards
    pub summary: String,

    /// Long-form body (Markdown)
    pub content: Option<String>,

    /// Thumbnail URL, or the placeholder image
    pub image_url: String,

    /// Author name
    pub author: Option<String>,

    /// Publication date (ISO 8601)
    pub date: Option<String>,

    /// Estimated reading time
    pub read_time: Option<String>,

    /// URL-friendly unique name
    pub slug: String,
}

impl Post {
    /// Create a post with only the identifying fields set
    pub fn new(id: i64, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            summary: String::new(),
            content: None,
            image_url: String::new(),
            author: None,
            date: None,
            read_time: None,
            slug: slug.into(),
        }
    }

    /// Whether this post answers to the given slug
    ///
    /// Posts whose record carried no slug never match.
    pub fn matches_slug(&self, slug: &str) -> bool {
        !self.slug.is_empty() && self.slug == slug
    }

    /// Find a post by slug in a list
    pub fn find_by_slug<'a>(posts: &'a [Post], slug: &str) -> Option<&'a Post> {
        posts.iter().find(|p| p.matches_slug(slug))
    }

    /// Get the previous post in a list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        pos.checked_sub(1).and_then(|i| posts.get(i))
    }

    /// Get the next post in a list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        posts.get(pos + 1)
    }
}
