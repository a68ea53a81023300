//! HTTP client for the headless CMS

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use super::dto::parse_posts;
use super::{CmsError, PostSource};
use crate::config::CmsConfig;
use crate::content::Post;

/// Path of the blog collection, relative to the CMS base address
const BLOGS_PATH: &str = "/api/blogs?populate=*";

/// Fetches published posts from the CMS REST API
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    base_url: String,
    token: String,
    placeholder_image: String,
}

impl CmsClient {
    /// Build a client from configuration
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CmsError::Client)?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            placeholder_image: config.placeholder_image.clone(),
        })
    }

    /// Base address used for requests and thumbnail URLs
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the blog collection
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, BLOGS_PATH)
    }
}

#[async_trait]
impl PostSource for CmsClient {
    async fn fetch_posts(&self) -> Result<Vec<Post>, CmsError> {
        let url = self.endpoint();
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(CmsError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Remote {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(CmsError::Network)?;
        parse_posts(&body, &self.base_url, &self.placeholder_image).map_err(CmsError::Shape)
    }
}
