//! Raw CMS payloads and their mapping onto [`Post`]

use serde::Deserialize;

use crate::content::Post;

/// Body of `GET /api/blogs?populate=*`
#[derive(Debug, Deserialize)]
pub struct BlogsResponse {
    pub data: Vec<RawPost>,
}

/// A blog entry exactly as the CMS sends it
///
/// Every field is optional: incomplete records are mapped, not rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPost {
    pub id: Option<i64>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Summary")]
    pub summary: Option<String>,
    #[serde(rename = "Thumball")]
    pub thumbnail: Option<RawMedia>,
    #[serde(rename = "Content")]
    pub content: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub slug: Option<String>,
}

/// Uploaded media reference
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawMedia {
    pub url: Option<String>,
}

impl RawPost {
    /// Map onto the local post shape
    ///
    /// `base_url` is prefixed to the thumbnail path as-is; posts without a
    /// thumbnail get `placeholder`.
    pub fn normalize(self, base_url: &str, placeholder: &str) -> Post {
        let image_url = match self
            .thumbnail
            .and_then(|media| media.url)
            .filter(|url| !url.is_empty())
        {
            Some(url) => format!("{}{}", base_url, url),
            None => placeholder.to_string(),
        };

        Post {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            content: self.content,
            image_url,
            author: None,
            date: self.published_at,
            read_time: None,
            slug: self.slug.unwrap_or_default(),
        }
    }
}

/// Parse a response body and normalize every record in source order
pub fn parse_posts(
    body: &str,
    base_url: &str,
    placeholder: &str,
) -> Result<Vec<Post>, serde_json::Error> {
    let response: BlogsResponse = serde_json::from_str(body)?;
    Ok(response
        .data
        .into_iter()
        .map(|raw| raw.normalize(base_url, placeholder))
        .collect())
}
