//! Fetch step of the extraction pipeline
//!
//! Validates the URL, runs a [`Fetcher`] under a hard timeout, and
//! classifies the response into a [`FetchOutcome`].

use crate::error::ExtractError;
use crate::fetchers::{Fetcher, HttpResponse};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Bound on the whole fetch (connect, headers, body)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Characters of raw body kept for non-HTML previews
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Marker appended to a preview that was cut short
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Fetch options that can be configured via tool builder
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Hard bound on the fetch
    pub timeout: Duration,
    /// Maximum characters of raw body kept for non-HTML responses
    pub preview_chars: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

/// A successfully fetched HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// The fetched URL
    pub url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// HTML body
    pub body: String,
}

/// Classified result of a successful (2xx) fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// HTML document ready for extraction
    Html(FetchedPage),
    /// Declared content type is absent or not HTML
    NonHtml {
        /// Content-Type header value
        content_type: Option<String>,
        /// Truncated raw body
        preview: String,
    },
}

/// Validate that `url` is an absolute http(s) URL
pub fn validate_url(url: &str) -> Result<Url, ExtractError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ExtractError::MissingUrl);
    }

    let parsed = Url::parse(url).map_err(|e| ExtractError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ExtractError::InvalidUrlScheme),
    }
}

/// Check if a declared content type indicates HTML
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| {
        let ct_lower = ct.to_lowercase();
        ct_lower.contains("text/html") || ct_lower.contains("application/xhtml")
    })
}

/// Truncate `body` to at most `max_chars` characters
///
/// The ellipsis marker is appended only when something was cut.
pub fn truncate_preview(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{}", &body[..end], PREVIEW_ELLIPSIS),
        None => body.to_string(),
    }
}

/// Fetch a URL and classify the response
///
/// Invalid URLs are rejected before the fetcher is invoked. The fetcher's
/// future is dropped when `options.timeout` elapses.
pub async fn fetch_page(
    fetcher: &dyn Fetcher,
    url: &str,
    options: &FetchOptions,
) -> Result<FetchOutcome, ExtractError> {
    let parsed = validate_url(url)?;

    debug!(fetcher = fetcher.name(), url = %parsed, "Fetching");
    let response = match tokio::time::timeout(options.timeout, fetcher.get(&parsed, options)).await
    {
        Ok(result) => result?,
        Err(_) => {
            warn!(url = %parsed, timeout_ms = options.timeout.as_millis() as u64, "Fetch timed out");
            return Err(ExtractError::Timeout(options.timeout));
        }
    };

    classify(parsed.as_str(), response, options)
}

/// Turn a raw response into a [`FetchOutcome`]
fn classify(
    url: &str,
    response: HttpResponse,
    options: &FetchOptions,
) -> Result<FetchOutcome, ExtractError> {
    let HttpResponse {
        status_code,
        content_type,
        body,
    } = response;

    if !(200..300).contains(&status_code) {
        warn!(url, status_code, "Non-success status");
        return Err(ExtractError::HttpStatus(status_code));
    }

    if !is_html_content_type(content_type.as_deref()) {
        warn!(
            url,
            content_type = content_type.as_deref().unwrap_or("<none>"),
            "Non-HTML content type"
        );
        return Ok(FetchOutcome::NonHtml {
            content_type,
            preview: truncate_preview(&body, options.preview_chars),
        });
    }

    Ok(FetchOutcome::Html(FetchedPage {
        url: url.to_string(),
        status_code,
        content_type,
        body,
    }))
}
