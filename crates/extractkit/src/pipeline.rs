//! Extraction pipeline
//!
//! Runs one request through `Fetching → Classifying → Parsing → Locating →
//! Sanitizing → Converting → Done`. Each stage either hands its value to the
//! next one or ends the request with a warning or an error; no stage runs
//! twice. Every request ends in exactly one [`ExtractResult`], including
//! when a stage panics.

use crate::convert::MarkdownConverter;
use crate::error::ExtractError;
use crate::fetch::{fetch_page, FetchOptions, FetchOutcome};
use crate::fetchers::Fetcher;
use crate::locate::locate;
use crate::sanitize::sanitize;
use crate::types::ExtractResult;
use dom_query::Document;
use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info, warn};

/// Warning when nothing is left after sanitizing
pub const EMPTY_AFTER_CLEANING: &str = "Content empty after cleaning";

/// Warning when the converter produced no text
pub const EMPTY_AFTER_CONVERSION: &str = "Content empty after conversion";

/// Pipeline state of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Classifying,
    Parsing,
    Locating,
    Sanitizing,
    Converting,
    Done,
}

impl Stage {
    /// Stable lowercase name, used as the status phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetching => "fetching",
            Stage::Classifying => "classifying",
            Stage::Parsing => "parsing",
            Stage::Locating => "locating",
            Stage::Sanitizing => "sanitizing",
            Stage::Converting => "converting",
            Stage::Done => "done",
        }
    }

    /// Rough completion percentage when the stage starts
    pub fn percent(&self) -> f32 {
        match self {
            Stage::Fetching => 0.0,
            Stage::Classifying => 60.0,
            Stage::Parsing => 65.0,
            Stage::Locating => 75.0,
            Stage::Sanitizing => 80.0,
            Stage::Converting => 90.0,
            Stage::Done => 100.0,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse, locate and sanitize an HTML document
///
/// Returns the single-line sanitized fragment of the main content region.
pub fn clean_html(html: &str) -> String {
    clean_html_with_stages(html, &mut |_| {})
}

fn clean_html_with_stages<F>(html: &str, on_stage: &mut F) -> String
where
    F: FnMut(Stage),
{
    on_stage(Stage::Parsing);
    let document = Document::from(html);

    on_stage(Stage::Locating);
    let region = locate(&document);
    debug!(
        selector = region.matched_selector().unwrap_or("body"),
        "Using content region"
    );

    on_stage(Stage::Sanitizing);
    sanitize(&region)
}

/// Run the pipeline, reporting each stage transition to `on_stage`
///
/// Never fails: errors and panics are folded into [`ExtractResult::Error`].
pub async fn extract_with<F>(
    fetcher: &dyn Fetcher,
    converter: &dyn MarkdownConverter,
    url: &str,
    options: &FetchOptions,
    on_stage: &mut F,
) -> ExtractResult
where
    F: FnMut(Stage),
{
    let outcome = AssertUnwindSafe(run(fetcher, converter, url, options, on_stage))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            error!(url, error = %err, "Extraction failed");
            ExtractResult::from_error(&err)
        }
        Err(panic) => {
            let err = ExtractError::Internal(panic_message(panic.as_ref()));
            error!(url, error = %err, "Extraction panicked");
            ExtractResult::from_error(&err)
        }
    }
}

async fn run<F>(
    fetcher: &dyn Fetcher,
    converter: &dyn MarkdownConverter,
    url: &str,
    options: &FetchOptions,
    on_stage: &mut F,
) -> Result<ExtractResult, ExtractError>
where
    F: FnMut(Stage),
{
    on_stage(Stage::Fetching);
    info!(url, "Fetching content");
    let outcome = fetch_page(fetcher, url, options).await?;

    on_stage(Stage::Classifying);
    let page = match outcome {
        FetchOutcome::Html(page) => page,
        FetchOutcome::NonHtml {
            content_type,
            preview,
        } => {
            let message = format!(
                "Content type is not HTML ({}). Raw text:",
                content_type.as_deref().unwrap_or("none")
            );
            return Ok(ExtractResult::warning_with_preview(message, preview));
        }
    };
    info!(url, kb = kilobytes(&page.body), "Fetched HTML");

    let cleaned = clean_html_with_stages(&page.body, &mut *on_stage);
    info!(url, kb = kilobytes(&cleaned), "HTML cleaned");
    if cleaned.trim().is_empty() {
        warn!(url, "{}", EMPTY_AFTER_CLEANING);
        return Ok(ExtractResult::warning(EMPTY_AFTER_CLEANING));
    }

    on_stage(Stage::Converting);
    debug!(url, converter = converter.name(), "Converting to markdown");
    let markdown = converter.convert(&cleaned)?;
    info!(url, kb = kilobytes(&markdown), "Converted to markdown");
    if markdown.trim().is_empty() {
        warn!(url, "{}", EMPTY_AFTER_CONVERSION);
        return Ok(ExtractResult::warning(EMPTY_AFTER_CONVERSION));
    }

    on_stage(Stage::Done);
    Ok(ExtractResult::success(markdown))
}

fn kilobytes(s: &str) -> u64 {
    (s.len() as u64 + 512) / 1024
}

/// Best-effort message from a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    }
}
