//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `cms.url`
pub const ENV_CMS_URL: &str = "BLOG_CMS_URL";
/// Environment variable overriding `cms.token`
pub const ENV_CMS_TOKEN: &str = "BLOG_CMS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,

    // Content source
    pub cms: CmsConfig,

    // Navigation bar
    pub menu: Vec<MenuItem>,

    // Local server
    pub server: ServerConfig,

    // Presentation defaults
    pub display: DisplayConfig,

    // Directory with static assets (placeholder image, css)
    pub static_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            subtitle: String::new(),
            author: String::new(),
            language: "en".to_string(),

            cms: CmsConfig::default(),

            menu: vec![
                MenuItem::new("Home", "/"),
                MenuItem::new("Blog", "/blog"),
            ],

            server: ServerConfig::default(),
            display: DisplayConfig::default(),
            static_dir: "static".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `BLOG_CMS_URL` / `BLOG_CMS_TOKEN` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_CMS_URL).filter(|v| !v.is_empty()) {
            tracing::debug!("CMS url overridden by {}", ENV_CMS_URL);
            self.cms.url = url;
        }
        if let Some(token) = lookup(ENV_CMS_TOKEN).filter(|v| !v.is_empty()) {
            tracing::debug!("CMS token overridden by {}", ENV_CMS_TOKEN);
            self.cms.token = token;
        }
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base address, e.g. `https://cms.example.com`
    pub url: String,
    /// Bearer token sent with every request
    pub token: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Image used for posts without a thumbnail
    pub placeholder_image: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:1337".to_string(),
            token: String::new(),
            timeout_secs: 10,
            placeholder_image: "/placeholder.jpg".to_string(),
        }
    }
}

/// Navigation bar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

impl MenuItem {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// Local server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

/// Fallbacks applied when rendering optional post fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub unknown_author: String,
    pub missing_date: String,
    pub default_read_time: String,
    pub content_fallback: String,
    /// Moment.js style format, or `LL` for a long date
    pub date_format: String,
    /// Number of posts shown on the home page
    pub home_posts: usize,
    /// Pass raw HTML in post bodies through instead of escaping it
    pub allow_raw_html: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unknown_author: "unknown".to_string(),
            missing_date: "no date".to_string(),
            default_read_time: "5 min".to_string(),
            content_fallback: "This post has no content yet.".to_string(),
            date_format: "LL".to_string(),
            home_posts: 3,
            allow_raw_html: false,
        }
    }
}
