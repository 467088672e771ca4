//! Main content locator
//!
//! Scans an ordered list of container selectors and picks the first one
//! that matches exactly one element. Falls back to `<body>`.

use dom_query::{Document, Selection};
use tracing::debug;

/// Candidate containers, most specific first
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    r#"[role="article"]"#,
    "main",
    r#"[role="main"]"#,
    "#content",
    "#main",
    ".post-content",
    ".entry-content",
    ".article-content",
    ".content",
    ".main",
    ".post",
    ".article",
];

/// Subtree of a parsed document chosen as the page's main content
pub struct ContentRegion<'a> {
    selection: Selection<'a>,
    matched: Option<&'static str>,
}

impl<'a> ContentRegion<'a> {
    /// Selection holding the region's root element
    pub fn selection(&self) -> &Selection<'a> {
        &self.selection
    }

    /// Candidate selector that won, `None` for the body fallback
    pub fn matched_selector(&self) -> Option<&'static str> {
        self.matched
    }

    /// True when no candidate matched exactly once
    pub fn is_fallback(&self) -> bool {
        self.matched.is_none()
    }
}

/// Locate the main content region of `document`
pub fn locate(document: &Document) -> ContentRegion<'_> {
    for &selector in CONTENT_SELECTORS {
        let selection = document.select(selector);
        match selection.length() {
            1 => {
                debug!(selector, "Content region located");
                return ContentRegion {
                    selection,
                    matched: Some(selector),
                };
            }
            0 => {}
            count => debug!(selector, count, "Ambiguous content candidate skipped"),
        }
    }

    debug!("No unique content candidate, using body");
    let body = document.select("body");
    let selection = if body.length() > 0 {
        body.first()
    } else {
        document.select(":root")
    };
    ContentRegion {
        selection,
        matched: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Matcher;

    fn region_text(document: &Document) -> String {
        locate(document).selection().text().trim().to_string()
    }

    #[test]
    fn test_selectors_are_valid() {
        for selector in CONTENT_SELECTORS {
            assert!(Matcher::new(selector).is_ok(), "invalid selector {selector}");
        }
    }

    #[test]
    fn test_single_article_selected() {
        let document = Document::from(
            "<html><body><div>Intro</div><article><p>Story</p></article></body></html>",
        );
        let region = locate(&document);
        assert_eq!(region.matched_selector(), Some("article"));
        assert_eq!(region.selection().text().trim(), "Story");
    }

    #[test]
    fn test_article_preferred_over_main() {
        let document = Document::from(
            "<body><main><p>Main</p><article><p>Article</p></article></main></body>",
        );
        let region = locate(&document);
        assert_eq!(region.matched_selector(), Some("article"));
        assert_eq!(region_text(&document), "Article");
    }

    #[test]
    fn test_ambiguous_candidate_skipped() {
        let document = Document::from(
            "<body><main><article>One</article><article>Two</article></main></body>",
        );
        let region = locate(&document);
        assert_eq!(region.matched_selector(), Some("main"));
        assert_eq!(region_text(&document), "OneTwo");
    }

    #[test]
    fn test_role_main_and_class_candidates() {
        let document = Document::from(
            r#"<body><div role="main">By role</div><div class="content">By class</div></body>"#,
        );
        assert_eq!(locate(&document).matched_selector(), Some(r#"[role="main"]"#));

        let document = Document::from(
            r#"<body><div class="content">A</div><div class="post">B</div></body>"#,
        );
        assert_eq!(locate(&document).matched_selector(), Some(".content"));
    }

    #[test]
    fn test_fallback_to_body() {
        let document = Document::from("<html><body><div><p>Plain page</p></div></body></html>");
        let region = locate(&document);
        assert!(region.is_fallback());
        assert_eq!(
            region.selection().inner_html().to_string(),
            "<div><p>Plain page</p></div>"
        );
    }

    #[test]
    fn test_all_candidates_ambiguous_falls_back() {
        let document = Document::from(
            r#"<body><article>a</article><article>b</article><div class="post">c</div><div class="post">d</div></body>"#,
        );
        let region = locate(&document);
        assert!(region.is_fallback());
        assert_eq!(region_text(&document), "abcd");
    }
}
