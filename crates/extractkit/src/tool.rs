//! Tool builder and contract for ExtractKit

use crate::convert::{HtmdConverter, MarkdownConverter};
use crate::fetch::FetchOptions;
use crate::fetchers::{Fetcher, HttpFetcher};
use crate::pipeline::{extract_with, Stage};
use crate::types::{ExtractRequest, ExtractResult, ToolOutput};
use crate::{TOOL_DESCRIPTION, TOOL_LLMTXT, TOOL_NAME};
use schemars::schema_for;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Status update during tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStatus {
    /// Current phase (a pipeline stage name, e.g. "fetching", "converting")
    pub phase: String,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Estimated completion percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<f32>,
}

impl ToolStatus {
    /// Create a new status with phase
    pub fn new(phase: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            message: None,
            percent_complete: None,
        }
    }

    /// Set message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set completion percentage
    pub fn with_percent(mut self, percent: f32) -> Self {
        self.percent_complete = Some(percent);
        self
    }
}

impl From<Stage> for ToolStatus {
    fn from(stage: Stage) -> Self {
        ToolStatus::new(stage.as_str()).with_percent(stage.percent())
    }
}

/// Builder for configuring the extraction tool
#[derive(Default)]
pub struct ToolBuilder {
    options: FetchOptions,
    fetcher: Option<Arc<dyn Fetcher>>,
    converter: Option<Arc<dyn MarkdownConverter>>,
}

impl ToolBuilder {
    /// Create a new tool builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Set the fetch timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set how many characters of a non-HTML body are previewed
    pub fn preview_chars(mut self, chars: usize) -> Self {
        self.options.preview_chars = chars;
        self
    }

    /// Replace the HTTP fetcher
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Replace the markdown converter
    pub fn converter(mut self, converter: Arc<dyn MarkdownConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Build the tool
    pub fn build(self) -> Tool {
        Tool {
            options: self.options,
            fetcher: self.fetcher.unwrap_or_else(|| Arc::new(HttpFetcher::new())),
            converter: self
                .converter
                .unwrap_or_else(|| Arc::new(HtmdConverter::new())),
        }
    }
}

/// Configured extraction tool
#[derive(Clone)]
pub struct Tool {
    options: FetchOptions,
    fetcher: Arc<dyn Fetcher>,
    converter: Arc<dyn MarkdownConverter>,
}

impl Default for Tool {
    fn default() -> Self {
        ToolBuilder::new().build()
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("options", &self.options)
            .field("fetcher", &self.fetcher.name())
            .field("converter", &self.converter.name())
            .finish()
    }
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Get tool name as registered with the transport
    pub fn name(&self) -> &'static str {
        TOOL_NAME
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Get the options requests run with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ExtractRequest);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        // Declare the URL format so callers validate before calling
        if let Some(url) = value.pointer_mut("/properties/url") {
            if let Some(obj) = url.as_object_mut() {
                obj.insert("format".to_string(), serde_json::json!("uri"));
            }
        }

        value
    }

    /// Execute the tool with the given request
    pub async fn execute(&self, req: ExtractRequest) -> ExtractResult {
        self.execute_with_status(req, |_| {}).await
    }

    /// Execute the tool with status updates
    pub async fn execute_with_status<F>(
        &self,
        req: ExtractRequest,
        mut status_callback: F,
    ) -> ExtractResult
    where
        F: FnMut(ToolStatus),
    {
        let mut on_stage = |stage: Stage| status_callback(ToolStatus::from(stage));
        let result = extract_with(
            self.fetcher.as_ref(),
            self.converter.as_ref(),
            &req.url,
            &self.options,
            &mut on_stage,
        )
        .await;

        let outcome = if result.is_error() {
            "error"
        } else if result.is_warning() {
            "warning"
        } else {
            "success"
        };
        status_callback(ToolStatus::new("complete").with_message(outcome).with_percent(100.0));

        result
    }

    /// Execute and wrap the result in the tool-call envelope
    pub async fn call(&self, req: ExtractRequest) -> ToolOutput {
        self.execute(req).await.into_tool_output()
    }
}
