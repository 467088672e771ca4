//! Default HTTP fetcher backed by reqwest

use crate::error::ExtractError;
use crate::fetch::FetchOptions;
use crate::fetchers::{Fetcher, HttpResponse};
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use tracing::debug;
use url::Url;

/// Accept header preferring HTML documents
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

/// Default HTTP fetcher
///
/// Builds a fresh client per request; nothing is pooled between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
    /// Create a new HTTP fetcher
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn get(&self, url: &Url, options: &FetchOptions) -> Result<HttpResponse, ExtractError> {
        let mut headers = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(options.timeout)
            .timeout(options.timeout)
            .build()
            .map_err(ExtractError::ClientBuildError)?;

        let response = client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ExtractError::from_reqwest(e, options.timeout))?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .bytes()
            .await
            .map_err(|e| ExtractError::from_reqwest(e, options.timeout))?;

        debug!(
            url = %url,
            status_code,
            content_type = content_type.as_deref().unwrap_or(""),
            bytes = body.len(),
            "Received response"
        );

        Ok(HttpResponse {
            status_code,
            content_type,
            body: String::from_utf8_lossy(&body).to_string(),
        })
    }
}
