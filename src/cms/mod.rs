//! CMS module - fetching posts from the headless CMS

mod client;
mod dto;
mod error;
mod repository;

use async_trait::async_trait;

use crate::content::Post;

pub use client::CmsClient;
pub use dto::{parse_posts, BlogsResponse, RawMedia, RawPost};
pub use error::CmsError;
pub use repository::{FetchState, PostRepository};

/// Where published posts come from
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch every published post, normalized, in source order
    async fn fetch_posts(&self) -> Result<Vec<Post>, CmsError>;
}
