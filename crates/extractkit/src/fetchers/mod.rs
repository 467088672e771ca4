//! Transport seam for page retrieval
//!
//! A [`Fetcher`] performs one GET and hands back the raw response. Scheme
//! validation, the timeout bound, and status/content-type classification
//! live in [`fetch_page`](crate::fetch::fetch_page) so that every fetcher
//! gets the same policy.

mod http;

pub use http::HttpFetcher;

use crate::error::ExtractError;
use crate::fetch::FetchOptions;
use async_trait::async_trait;
use url::Url;

/// Raw HTTP response as returned by a fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// Body decoded as text
    pub body: String,
}

/// Trait for page fetchers
///
/// Implementations issue exactly one request per call and never retry.
/// The returned future may be dropped at any time to abort the request.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Unique identifier for this fetcher (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Issue a GET for an already validated http(s) URL
    async fn get(&self, url: &Url, options: &FetchOptions) -> Result<HttpResponse, ExtractError>;
}
