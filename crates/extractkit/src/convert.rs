//! HTML to markdown conversion

use crate::error::ExtractError;
use htmd::options::{CodeBlockStyle, HeadingStyle, LinkStyle, Options};
use htmd::HtmlToMarkdown;

/// Converts a sanitized HTML fragment to markdown
pub trait MarkdownConverter: Send + Sync {
    /// Unique identifier for this converter (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Convert an HTML fragment to markdown text
    fn convert(&self, html: &str) -> Result<String, ExtractError>;
}

/// Markdown converter backed by htmd
///
/// Renders ATX headings, fenced code blocks and inline links.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmdConverter;

impl HtmdConverter {
    /// Create a new htmd converter
    pub fn new() -> Self {
        Self
    }

    fn build(&self) -> HtmlToMarkdown {
        let options = Options {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            link_style: LinkStyle::Inlined,
            ..Default::default()
        };
        HtmlToMarkdown::builder().options(options).build()
    }
}

impl MarkdownConverter for HtmdConverter {
    fn name(&self) -> &'static str {
        "htmd"
    }

    fn convert(&self, html: &str) -> Result<String, ExtractError> {
        let markdown = self
            .build()
            .convert(html)
            .map_err(|e| ExtractError::ConversionError(e.to_string()))?;
        Ok(filter_excessive_newlines(markdown.trim()))
    }
}

/// Convert an HTML fragment to markdown with the default converter
pub fn html_to_markdown(html: &str) -> Result<String, ExtractError> {
    HtmdConverter::new().convert(html)
}

/// Filter excessive newlines: keep at most 2 consecutive newlines
pub fn filter_excessive_newlines(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    result
}
