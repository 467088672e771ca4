//! ExtractKit - main-content extraction for AI tools
//!
//! Fetches a web page, locates its primary content region, strips
//! boilerplate markup, and returns the content as markdown.
//!
//! ## Pipeline
//!
//! Every request runs the same linear pipeline (see [`pipeline`]):
//! - [`fetch_page`] validates the URL and fetches it through a [`Fetcher`]
//!   under a hard timeout
//! - [`locate`] picks the first candidate container matching exactly once,
//!   falling back to `<body>`
//! - [`sanitize`] removes navigation, ads, scripts, form controls and noisy
//!   attributes
//! - a [`MarkdownConverter`] renders the cleaned fragment
//!
//! The outcome is always an [`ExtractResult`]: success, warning or error.

mod convert;
mod error;
pub mod fetch;
pub mod fetchers;
pub mod locate;
pub mod pipeline;
pub mod sanitize;
mod tool;
mod types;

pub use convert::{html_to_markdown, HtmdConverter, MarkdownConverter};
pub use error::ExtractError;
pub use fetch::{fetch_page, FetchOptions, FetchOutcome, FetchedPage};
pub use fetchers::{Fetcher, HttpFetcher, HttpResponse};
pub use locate::{locate, ContentRegion};
pub use pipeline::{clean_html, Stage};
pub use sanitize::sanitize;
pub use tool::{Tool, ToolBuilder, ToolStatus};
pub use types::{ExtractRequest, ExtractResult, ToolContent, ToolOutput};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "ExtractKit/1.0";

/// Tool name exposed to callers
pub const TOOL_NAME: &str = "extract-content";

/// Tool description for LLM consumption
pub const TOOL_DESCRIPTION: &str = r#"Fetches a web page and returns its main content as clean markdown.

- Locates the primary content region (article, main, common content containers)
- Strips navigation, ads, banners, scripts and form controls
- Returns a warning with a raw preview for non-HTML content
- 15 second timeout, single attempt"#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# extract-content Tool

Fetches a web page and returns its main content as clean markdown.

## Capabilities
- HTTP/HTTPS GET with a 15 second timeout
- Main content detection: the first of `article`, `[role="article"]`, `main`,
  `[role="main"]`, `#content`, `#main`, `.post-content`, `.entry-content`,
  `.article-content`, `.content`, `.main`, `.post`, `.article` that matches
  exactly one element; otherwise the whole `<body>`
- Removal of headers, footers, navigation, sidebars, ads, cookie banners,
  share widgets, comments, modals, scripts, styles, iframes and form controls
- Inline data URIs in `src` are replaced by `...`

## Input Parameters
- `url` (required): The URL to extract (must be http:// or https://)

## Output
A single text block:
- Markdown of the main content on success
- `Warning: ...` for non-HTML content (with up to 500 characters of raw text)
  or when nothing is left after cleaning or conversion
- An error message with `isError: true` for invalid URLs, network failures,
  timeouts and non-2xx statuses

## Examples

### Extract an article
```json
{"url": "https://example.com/blog/post"}
```

## Error Handling
- Invalid URLs are rejected without any network access
- Non-2xx statuses return `Error: Failed to fetch URL. Status: <code>`
- Timeouts return `Error: Request timed out after 15 seconds`
"#;

/// Extract the main content of `url` with default settings
///
/// For custom options, build a [`Tool`].
pub async fn extract_content(url: &str) -> ExtractResult {
    Tool::default().execute(ExtractRequest::new(url)).await
}
