//! Errors raised while talking to the CMS

use thiserror::Error;

/// Why a fetch cycle failed
///
/// The variants stay distinct for logging; consumers only ever see
/// the rendered message through `FetchState::Failure`.
#[derive(Debug, Error)]
pub enum CmsError {
    /// The request did not complete
    #[error("failed to reach the CMS: {0}")]
    Network(#[source] reqwest::Error),

    /// The CMS answered with a non-success status
    #[error("failed to fetch posts: CMS responded with status {status}")]
    Remote { status: u16 },

    /// The payload did not have the expected structure
    #[error("unexpected CMS payload: {0}")]
    Shape(#[source] serde_json::Error),

    /// The HTTP client could not be built from configuration
    #[error("invalid CMS client configuration: {0}")]
    Client(#[source] reqwest::Error),
}
