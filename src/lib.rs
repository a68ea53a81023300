//! headless-blog: a blog site rendered from a headless CMS
//!
//! Posts are fetched from the CMS REST API, normalized into [`content::Post`]
//! and rendered with embedded Tera templates. The selection module tracks
//! which post is on display, whether opened from the listing or reached
//! through its slug.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod selection;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
}

impl Blog {
    /// Create a new instance from a directory
    ///
    /// Reads `_config.yml` when present, then applies environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            static_dir,
        })
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::init_site(&self.base_dir)
    }

    /// Print every post
    pub async fn list(&self) -> Result<()> {
        commands::list::run(self).await
    }

    /// Print a single post
    pub async fn show(&self, slug: &str) -> Result<()> {
        commands::show::run(self, slug).await
    }

    /// Serve the site
    pub async fn serve(&self, ip: &str, port: u16, open: bool) -> Result<()> {
        server::start(self, ip, port, open).await
    }
}
