//! Core types for ExtractKit

use crate::error::ExtractError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request to extract the main content of a page
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractRequest {
    /// The URL to extract content from (required, must be http:// or https://)
    pub url: String,
}

impl ExtractRequest {
    /// Create a new request with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Outcome of one extraction request
///
/// Exactly one variant is produced per request. Warnings are degraded but
/// non-error results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExtractResult {
    /// Markdown rendering of the page's main content
    Success { markdown: String },
    /// Degraded result with a caution message
    Warning {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        preview: Option<String>,
    },
    /// Terminal failure
    Error { message: String },
}

impl ExtractResult {
    /// Create a success result
    pub fn success(markdown: impl Into<String>) -> Self {
        ExtractResult::Success {
            markdown: markdown.into(),
        }
    }

    /// Create a warning without a raw preview
    pub fn warning(message: impl Into<String>) -> Self {
        ExtractResult::Warning {
            message: message.into(),
            preview: None,
        }
    }

    /// Create a warning carrying a raw text preview
    pub fn warning_with_preview(message: impl Into<String>, preview: impl Into<String>) -> Self {
        ExtractResult::Warning {
            message: message.into(),
            preview: Some(preview.into()),
        }
    }

    /// Create an error result from a message
    pub fn error(message: impl Into<String>) -> Self {
        ExtractResult::Error {
            message: message.into(),
        }
    }

    /// Classify an error into a terminal error outcome
    pub fn from_error(err: &ExtractError) -> Self {
        if err.is_unclassified() {
            ExtractResult::error(format!("Error processing URL: {}", err))
        } else {
            ExtractResult::error(format!("Error: {}", err))
        }
    }

    /// True for the error variant
    pub fn is_error(&self) -> bool {
        matches!(self, ExtractResult::Error { .. })
    }

    /// True for the warning variant
    pub fn is_warning(&self) -> bool {
        matches!(self, ExtractResult::Warning { .. })
    }

    /// Human-readable text for the caller
    ///
    /// Warnings are prefixed with `Warning: ` and followed by the raw preview
    /// when one is present.
    pub fn text(&self) -> String {
        match self {
            ExtractResult::Success { markdown } => markdown.clone(),
            ExtractResult::Warning {
                message,
                preview: Some(preview),
            } => format!("Warning: {}\n{}", message, preview),
            ExtractResult::Warning {
                message,
                preview: None,
            } => format!("Warning: {}", message),
            ExtractResult::Error { message } => message.clone(),
        }
    }

    /// Wrap into the tool-call result envelope
    pub fn into_tool_output(self) -> ToolOutput {
        let is_error = self.is_error();
        ToolOutput {
            content: vec![ToolContent::text(self.text())],
            is_error: if is_error { Some(true) } else { None },
        }
    }
}

/// A content block of a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContent {
    /// Block type, always "text"
    #[serde(rename = "type")]
    pub kind: String,
    /// Block text
    pub text: String,
}

impl ToolContent {
    /// Create a text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Result payload returned to the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Content blocks
    pub content: Vec<ToolContent>,
    /// Set on failure only
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let req = ExtractRequest::new("https://example.com");
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"url":"https://example.com"}"#);
    }

    #[test]
    fn test_request_missing_url_rejected() {
        let result: Result<ExtractRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_warning_text() {
        let warning = ExtractResult::warning("Content empty after cleaning");
        assert_eq!(warning.text(), "Warning: Content empty after cleaning");

        let warning = ExtractResult::warning_with_preview(
            "Content type is not HTML (application/json). Raw text:",
            "{\"a\":1}",
        );
        assert_eq!(
            warning.text(),
            "Warning: Content type is not HTML (application/json). Raw text:\n{\"a\":1}"
        );
    }

    #[test]
    fn test_from_error_prefixes() {
        let result = ExtractResult::from_error(&ExtractError::HttpStatus(503));
        assert_eq!(result.text(), "Error: Failed to fetch URL. Status: 503");

        let result = ExtractResult::from_error(&ExtractError::Internal("boom".to_string()));
        assert_eq!(result.text(), "Error processing URL: boom");
    }

    #[test]
    fn test_tool_output_envelope() {
        let output = ExtractResult::error("Error: nope").into_tool_output();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Error: nope");

        let output = ExtractResult::warning("careful").into_tool_output();
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("isError").is_none());

        let output = ExtractResult::success("# Title").into_tool_output();
        assert_eq!(output.is_error, None);
        assert_eq!(output.content[0].text, "# Title");
    }
}
