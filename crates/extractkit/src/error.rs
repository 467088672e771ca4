//! Error types for ExtractKit

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while extracting content from a URL
#[derive(Debug, Error)]
pub enum ExtractError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL could not be parsed as an absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// No response within the configured bound
    #[error("Request timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// Failed to connect to server
    #[error("Failed to connect to server: {0}")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with a non-2xx status
    #[error("Failed to fetch URL. Status: {0}")]
    HttpStatus(u16),

    /// HTML to markdown conversion failed
    #[error("Markdown conversion failed: {0}")]
    ConversionError(String),

    /// Unexpected fault inside the pipeline
    #[error("{0}")]
    Internal(String),
}

impl ExtractError {
    /// Create an error from a reqwest error
    ///
    /// `timeout` is the bound the request ran under, reported back in the
    /// timeout message.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ExtractError::Timeout(timeout)
        } else if err.is_connect() {
            ExtractError::ConnectError(err)
        } else {
            ExtractError::RequestError(err.to_string())
        }
    }

    /// True for faults outside the input/network/HTTP taxonomy
    pub fn is_unclassified(&self) -> bool {
        matches!(
            self,
            ExtractError::ConversionError(_) | ExtractError::Internal(_)
        )
    }
}
