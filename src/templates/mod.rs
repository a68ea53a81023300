//! Built-in site templates using Tera template engine
//!
//! All templates are embedded directly in the binary. The data structures
//! at the bottom are the presentation boundary: display fallbacks for
//! optional post fields are applied here and nowhere else.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{DisplayConfig, MenuItem, SiteConfig};
use crate::content::{MarkdownRenderer, Post};
use crate::helpers::{format_date, is_current, overlay_path, post_path};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("status.html", include_str!("site/status.html")),
            // Partials
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/overlay.html",
                include_str!("site/partials/overlay.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

// Data structures for template context

/// A post with display fallbacks applied
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub summary: String,
    /// Rendered HTML body
    pub content: String,
    pub image_url: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub slug: String,
    /// Route-based detail page
    pub path: String,
    /// Listing with this post opened in the overlay
    pub overlay_path: String,
}

impl PostView {
    pub fn new(post: &Post, display: &DisplayConfig, markdown: &MarkdownRenderer) -> Self {
        let body = post
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&display.content_fallback);

        Self {
            id: post.id,
            title: post.title.clone(),
            summary: post.summary.clone(),
            content: markdown.render(body),
            image_url: post.image_url.clone(),
            author: post
                .author
                .clone()
                .unwrap_or_else(|| display.unknown_author.clone()),
            date: post
                .date
                .as_deref()
                .map(|d| format_date(d, &display.date_format))
                .unwrap_or_else(|| display.missing_date.clone()),
            read_time: post
                .read_time
                .clone()
                .unwrap_or_else(|| display.default_read_time.clone()),
            slug: post.slug.clone(),
            path: post_path(&post.slug),
            overlay_path: overlay_path(&post.slug),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,
}

impl From<&SiteConfig> for ConfigData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItemData {
    pub name: String,
    pub path: String,
    pub active: bool,
}

impl MenuItemData {
    /// Build the navigation bar for the page at `current`
    pub fn build(menu: &[MenuItem], current: &str) -> Vec<Self> {
        menu.iter()
            .map(|item| Self {
                name: item.name.clone(),
                path: item.path.clone(),
                active: is_current(&item.path, current),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

impl From<&Post> for NavPost {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            path: post_path(&post.slug),
        }
    }
}
