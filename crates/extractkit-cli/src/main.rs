//! ExtractKit CLI - Command-line interface for extracting web page content

mod mcp;

use clap::{Parser, Subcommand, ValueEnum};
use extractkit::{ExtractRequest, ExtractResult, Tool, TOOL_LLMTXT};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format for extract subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown (warnings and errors as plain text)
    #[default]
    Md,
    /// JSON tool-call envelope
    Json,
}

/// ExtractKit - main-content extraction for AI tools
#[derive(Parser, Debug)]
#[command(name = "extractkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp,
    /// Extract the main content of a URL as markdown
    Extract {
        /// URL to extract
        url: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,

        /// Fetch timeout in seconds
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Mcp) => {
            mcp::run_server().await;
        }
        Some(Commands::Extract {
            url,
            output,
            user_agent,
            timeout_secs,
        }) => {
            run_extract(&url, output, user_agent, timeout_secs).await;
        }
        None => {
            eprintln!("Usage: extractkit extract <URL>");
            eprintln!("   or: extractkit mcp");
            eprintln!("   or: extractkit --help");
            std::process::exit(1);
        }
    }
}

/// Log to stderr; stdout carries output and MCP frames
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run_extract(
    url: &str,
    output: OutputFormat,
    user_agent: Option<String>,
    timeout_secs: u64,
) {
    let mut builder = Tool::builder().timeout(Duration::from_secs(timeout_secs));

    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }

    let tool = builder.build();
    let result = tool.execute(ExtractRequest::new(url)).await;
    let failed = result.is_error();

    match output {
        OutputFormat::Md => {
            if failed {
                eprintln!("{}", format_md(&result));
            } else {
                writeln_safe(&format_md(&result));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.into_tool_output())
                .unwrap_or_else(|e| {
                    eprintln!("Error serializing response: {}", e);
                    std::process::exit(1);
                });
            writeln_safe(&json);
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Text shown for a result in markdown mode
fn format_md(result: &ExtractResult) -> String {
    result.text()
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_defaults() {
        let cli = Cli::parse_from(["extractkit", "extract", "https://example.com"]);
        match cli.command {
            Some(Commands::Extract {
                url,
                output,
                user_agent,
                timeout_secs,
            }) => {
                assert_eq!(url, "https://example.com");
                assert!(matches!(output, OutputFormat::Md));
                assert_eq!(user_agent, None);
                assert_eq!(timeout_secs, 15);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::parse_from([
            "extractkit",
            "extract",
            "https://example.com",
            "-o",
            "json",
            "--user-agent",
            "Bot/2.0",
            "--timeout-secs",
            "3",
        ]);
        match cli.command {
            Some(Commands::Extract {
                output,
                user_agent,
                timeout_secs,
                ..
            }) => {
                assert!(matches!(output, OutputFormat::Json));
                assert_eq!(user_agent.as_deref(), Some("Bot/2.0"));
                assert_eq!(timeout_secs, 3);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_mcp_and_llmtxt() {
        let cli = Cli::parse_from(["extractkit", "mcp"]);
        assert!(matches!(cli.command, Some(Commands::Mcp)));

        let cli = Cli::parse_from(["extractkit", "--llmtxt"]);
        assert!(cli.llmtxt);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_format_md() {
        assert_eq!(format_md(&ExtractResult::success("# Hi")), "# Hi");
        assert_eq!(
            format_md(&ExtractResult::warning("Content empty after cleaning")),
            "Warning: Content empty after cleaning"
        );
        assert_eq!(
            format_md(&ExtractResult::error("Error: Failed to fetch URL. Status: 404")),
            "Error: Failed to fetch URL. Status: 404"
        );
    }
}
