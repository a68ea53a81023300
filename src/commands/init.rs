//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

const DEFAULT_CONFIG: &str = r#"# Blog configuration

# Site
title: Blog
subtitle: ''
author: ''
language: en

# Headless CMS
## BLOG_CMS_URL and BLOG_CMS_TOKEN override these settings
cms:
  url: http://localhost:1337
  token: ''
  timeout_secs: 10
  placeholder_image: /placeholder.jpg

# Navigation bar
menu:
  - name: Home
    path: /
  - name: Blog
    path: /blog

# Local server
server:
  ip: localhost
  port: 4000

# Fallbacks for fields the CMS leaves empty
display:
  unknown_author: unknown
  missing_date: no date
  default_read_time: 5 min
  content_fallback: This post has no content yet.
  date_format: LL
  home_posts: 3
  allow_raw_html: false

static_dir: static
"#;

const DEFAULT_STYLE: &str = r#"body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; }
body.scroll-locked { overflow: hidden; }
.navbar { display: flex; justify-content: space-between; align-items: center; padding: 0 1.5rem; height: 4rem; }
.nav-links { display: flex; gap: 1.5rem; list-style: none; }
.nav-links a.active { font-weight: 600; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem 1rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.card img, .hero img, .cover img, .overlay-cover img { width: 100%; object-fit: cover; }
.overlay { position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; z-index: 50; }
.overlay-backdrop { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); }
.overlay-body { position: relative; max-width: 56rem; max-height: 90vh; overflow-y: auto; background: #fff; border-radius: 1rem; padding: 2rem; }
.overlay-close { position: absolute; top: 1rem; right: 1rem; font-size: 1.5rem; }
.status-error { color: #dc2626; }
.status-loading, .status-not-found { color: #6b7280; text-align: center; }
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let defaults = SiteConfig::default();
    let static_dir = target_dir.join(&defaults.static_dir);
    fs::create_dir_all(static_dir.join("css"))?;

    write_if_missing(&target_dir.join("_config.yml"), DEFAULT_CONFIG)?;
    write_if_missing(&static_dir.join("css/style.css"), DEFAULT_STYLE)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
    } else {
        fs::write(path, content)?;
        tracing::debug!("Created {:?}", path);
    }
    Ok(())
}
