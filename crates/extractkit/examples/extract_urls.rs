//! Example: Extract various URLs and display results
//!
//! Run with: cargo run -p extractkit --example extract_urls
//!
//! Hits live sites, so results depend on network access.

use extractkit::{extract_content, ExtractResult};

/// Expected outcome of a live extraction
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Expect {
    Success,
    Warning,
    Error,
}

struct TestCase {
    url: &'static str,
    description: &'static str,
    expect: Expect,
    expect_contains: Option<&'static str>,
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        url: "https://example.com",
        description: "Simple HTML page (body fallback)",
        expect: Expect::Success,
        expect_contains: Some("Example Domain"),
    },
    TestCase {
        url: "https://httpbin.org/html",
        description: "HTML endpoint",
        expect: Expect::Success,
        expect_contains: Some("Herman Melville"),
    },
    TestCase {
        url: "https://httpbin.org/json",
        description: "JSON endpoint (non-HTML preview)",
        expect: Expect::Warning,
        expect_contains: Some("slideshow"),
    },
    TestCase {
        url: "https://httpbin.org/status/404",
        description: "Missing page",
        expect: Expect::Error,
        expect_contains: Some("404"),
    },
    TestCase {
        url: "ftp://example.com/file.txt",
        description: "Unsupported scheme",
        expect: Expect::Error,
        expect_contains: Some("http:// or https://"),
    },
];

#[tokio::main]
async fn main() {
    println!("ExtractKit URL Examples");
    println!("=======================\n");

    let mut passed = 0;
    let mut failed = 0;

    for (i, case) in TEST_CASES.iter().enumerate() {
        println!("{}. {}", i + 1, case.description);
        println!("   URL: {}", case.url);

        let result = extract_content(case.url).await;
        print_summary(&result);

        if check_expectations(case, &result) {
            println!("   ✓ PASS\n");
            passed += 1;
        } else {
            println!("   ✗ FAIL (expectations not met)\n");
            failed += 1;
        }
    }

    println!("=======================");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn outcome(result: &ExtractResult) -> Expect {
    match result {
        ExtractResult::Success { .. } => Expect::Success,
        ExtractResult::Warning { .. } => Expect::Warning,
        ExtractResult::Error { .. } => Expect::Error,
    }
}

fn print_summary(result: &ExtractResult) {
    println!("   Outcome: {:?}", outcome(result));

    let text = result.text();
    let preview = text.chars().take(100).collect::<String>().replace('\n', " ");
    println!(
        "   Preview: {}{}",
        preview,
        if text.chars().count() > 100 { "..." } else { "" }
    );
}

fn check_expectations(case: &TestCase, result: &ExtractResult) -> bool {
    let actual = outcome(result);
    if actual != case.expect {
        println!("   Expected {:?}, got {:?}", case.expect, actual);
        return false;
    }

    if let Some(expected_text) = case.expect_contains {
        if !result.text().contains(expected_text) {
            println!("   Expected text to contain '{}'", expected_text);
            return false;
        }
    }

    true
}
