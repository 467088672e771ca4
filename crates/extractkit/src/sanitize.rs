//! Content region sanitizer
//!
//! Removes boilerplate subtrees and noisy attributes from a located region,
//! then serializes it as a single-line HTML fragment.

use crate::locate::ContentRegion;
use tracing::debug;

/// Elements removed from the region together with their subtrees
pub const REMOVE_SELECTORS: &[&str] = &[
    // Page chrome
    "header",
    "footer",
    "nav",
    r#"[role="navigation"]"#,
    "aside",
    ".sidebar",
    r#"[role="complementary"]"#,
    ".nav",
    ".menu",
    ".header",
    ".footer",
    // Ads, consent and social widgets
    ".advertisement",
    ".ads",
    ".cookie-notice",
    ".cookie-banner",
    ".consent",
    ".social-share",
    ".share-buttons",
    ".related-posts",
    ".comments",
    "#comments",
    // Overlays and prompts
    ".popup",
    ".modal",
    ".overlay",
    ".banner",
    ".alert",
    ".notification",
    ".subscription",
    ".newsletter",
    ".noprint",
    // Non-content markup
    "script",
    "style",
    "noscript",
    "iframe",
    // Form controls
    "button",
    "form",
    "input",
    "textarea",
    "select",
];

/// Attributes dropped from every remaining element
pub const STRIP_ATTRIBUTES: &[&str] = &[
    "style",
    "onclick",
    "onload",
    "onerror",
    "onmouseover",
    "onmouseout",
    "onfocus",
    "onblur",
    "target",
];

/// Attributes whose `data:` URIs are replaced by [`DATA_URI_PLACEHOLDER`]
pub const DATA_URI_ATTRIBUTES: &[&str] = &["src", "srcset"];

/// Replacement value for inlined data URIs
pub const DATA_URI_PLACEHOLDER: &str = "...";

/// Sanitize a content region in place and return its serialized fragment
///
/// The result is the region's inner HTML with whitespace normalized. It is
/// empty when nothing survives cleaning.
pub fn sanitize(region: &ContentRegion<'_>) -> String {
    let root = region.selection();

    let removed = root.select(&REMOVE_SELECTORS.join(", "));
    let removed_count = removed.length();
    removed.remove();

    let remaining = root.select("*");
    for node in remaining.nodes() {
        for attr in STRIP_ATTRIBUTES {
            node.remove_attr(attr);
        }
        for attr in DATA_URI_ATTRIBUTES {
            if node.attr(attr).is_some_and(|value| is_data_uri(&value)) {
                node.set_attr(attr, DATA_URI_PLACEHOLDER);
            }
        }
    }

    let html = normalize_whitespace(&root.inner_html());
    debug!(
        removed = removed_count,
        elements = remaining.length(),
        bytes = html.len(),
        "Region sanitized"
    );
    html
}

/// Check whether an attribute value is an inline data URI
fn is_data_uri(value: &str) -> bool {
    value
        .trim_start()
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
}

/// Collapse whitespace into a single-line fragment
///
/// Tabs, carriage returns and newlines become spaces, runs of two or more
/// whitespace characters collapse to one space, and the ends are trimmed.
/// A lone non-breaking or other whitespace character is kept as is.
pub fn normalize_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut run: Option<char> = None;
    let mut run_len = 0;

    for c in s.chars() {
        if c.is_whitespace() {
            if run_len == 0 {
                run = Some(if matches!(c, '\t' | '\r' | '\n') { ' ' } else { c });
            }
            run_len += 1;
            continue;
        }
        flush_run(&mut result, run.take(), run_len);
        run_len = 0;
        result.push(c);
    }
    flush_run(&mut result, run, run_len);

    result.trim().to_string()
}

fn flush_run(result: &mut String, first: Option<char>, len: usize) {
    match (first, len) {
        (Some(c), 1) => result.push(c),
        (Some(_), _) => result.push(' '),
        (None, _) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::locate;
    use dom_query::{Document, Matcher};

    fn sanitize_html(html: &str) -> String {
        let document = Document::from(html);
        let region = locate(&document);
        sanitize(&region)
    }

    #[test]
    fn test_selectors_are_valid() {
        for selector in REMOVE_SELECTORS {
            assert!(Matcher::new(selector).is_ok(), "invalid selector {selector}");
        }
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\n\tb   c \r\n"), "a b c");
        assert_eq!(normalize_whitespace("<p>a</p>\n<p>b</p>"), "<p>a</p> <p>b</p>");
        assert_eq!(normalize_whitespace("one two"), "one two");
        assert_eq!(normalize_whitespace("\u{a0}"), "");
        assert_eq!(normalize_whitespace("a\u{a0}b"), "a\u{a0}b");
        assert_eq!(normalize_whitespace("a\u{a0} b"), "a b");
        assert_eq!(normalize_whitespace("\n\t  "), "");
    }

    #[test]
    fn test_is_data_uri() {
        assert!(is_data_uri("data:image/png;base64,AAAA"));
        assert!(is_data_uri("DATA:text/plain,hi"));
        assert!(!is_data_uri("https://example.com/a.png"));
        assert!(!is_data_uri("dat"));
        assert!(!is_data_uri("..."));
    }

    #[test]
    fn test_removes_boilerplate_subtrees() {
        let html = r#"<body><article>
            <nav><a href="/">Home</a></nav>
            <h1>Title</h1>
            <div class="social-share"><span>Share me</span></div>
            <p>Body text</p>
            <aside><p>Related</p></aside>
            <form><input name="q"><button>Go</button></form>
            <div id="comments"><p>First!</p></div>
            <footer>Copyright</footer>
        </article></body>"#;
        let cleaned = sanitize_html(html);
        assert_eq!(cleaned, "<h1>Title</h1> <p>Body text</p>");
    }

    #[test]
    fn test_nav_and_script_only_is_empty() {
        let html = "<html><body>\n<nav><a href=\"/\">Home</a></nav>\n<script>var x = 1;</script>\n</body></html>";
        assert_eq!(sanitize_html(html), "");
    }

    #[test]
    fn test_strips_style_events_and_target() {
        let html = r#"<body><article><p style="color:red" onclick="track()" class="lead">Hi <a href="/x" target="_blank" onmouseover="x()">link</a></p></article></body>"#;
        let cleaned = sanitize_html(html);
        assert_eq!(cleaned, r#"<p class="lead">Hi <a href="/x">link</a></p>"#);
    }

    #[test]
    fn test_data_uri_replaced() {
        let html = r#"<body><article><p>Pic</p><img src="data:image/png;base64,AAAA" alt="dot"><img src="/real.png"></article></body>"#;
        let cleaned = sanitize_html(html);
        assert!(cleaned.contains(r#"src="...""#));
        assert!(!cleaned.contains("base64,AAAA"));
        assert!(cleaned.contains(r#"src="/real.png""#));
        assert!(cleaned.contains(r#"alt="dot""#));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let html = r#"<html><body><article>
            <h2 style="margin:0">Heading</h2>
            <p onclick="x()">Some   <em>emphasis</em>
               and text</p>
            <ul><li>One</li><li>Two</li></ul>
            <img src="data:image/gif;base64,R0lGOD">
            <div class="ads">Buy</div>
        </article></body></html>"#;
        let first = sanitize_html(html);

        let reparsed = Document::from(format!("<html><body>{}</body></html>", first));
        let body = locate(&reparsed);
        assert!(body.is_fallback());
        let second = sanitize(&body);

        assert_eq!(first, second);
        assert!(first.contains(r#"<img src="...">"#));
        assert!(!first.contains("Buy"));
    }

    #[test]
    fn test_region_itself_is_kept() {
        // Only descendants are matched against the denylist.
        let html = r#"<body><div class="content noprint"><p>Kept</p></div></body>"#;
        assert_eq!(sanitize_html(html), "<p>Kept</p>");
    }
}
