//! Content module - the post model and body rendering

mod markdown;
mod post;

pub use markdown::MarkdownRenderer;
pub use post::Post;
