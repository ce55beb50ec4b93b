//! Sitegraph main entry point
//!
//! Command-line interface for the sitegraph crawler.

use anyhow::Context;
use clap::Parser;
use sitegraph::config::{CrawlConfig, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use sitegraph::crawler::CrawlSession;
use sitegraph::output::{default_output_path, render_json, render_summary, write_report_file};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitegraph: a same-origin link graph crawler
///
/// Crawls all local links breadth-first from a start URL, recording page
/// titles, H1 headings, HTTP statuses and the inbound-link graph, and
/// writes the results as a sorted JSON array.
#[derive(Parser, Debug)]
#[command(name = "sitegraph")]
#[command(version = "0.1.0")]
#[command(about = "Crawl same-origin links from a start URL", long_about = None)]
struct Cli {
    /// Start URL (e.g. https://example.com)
    start_url: String,

    /// Maximum number of pages to scan
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: f64,

    /// User-Agent header to send
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Respect robots.txt Disallow rules for the wildcard agent
    #[arg(long)]
    respect_robots: bool,

    /// Only crawl URLs whose path starts with this prefix (e.g. /docs)
    #[arg(long)]
    path_prefix: Option<String>,

    /// Output file path, or '-' for stdout (default: auto-generated under crawls/)
    #[arg(long)]
    out: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output, including the summary
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig {
        start_url: cli.start_url.clone(),
        max_pages: cli.max_pages,
        timeout_secs: cli.timeout,
        user_agent: cli.user_agent.clone(),
        respect_robots: cli.respect_robots,
        path_prefix: cli.path_prefix.clone(),
    };

    // Precondition failures (bad start URL, prefix mismatch) surface here,
    // before any network access
    let session = CrawlSession::new(config).context("cannot start crawl")?;
    let report = session.run().await;

    if !cli.quiet {
        eprint!("{}", render_summary(&report.stats));
    }

    let json = render_json(&report.pages, cli.pretty)?;

    match cli.out.as_deref() {
        Some("-") => println!("{}", json),
        out => {
            let path: PathBuf = match out {
                Some(p) => PathBuf::from(p),
                None => default_output_path(&cli.start_url),
            };
            write_report_file(&path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("results written to {}", path.display());
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the JSON payload when
/// `--out -` is used.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegraph=info,warn"),
            1 => EnvFilter::new("sitegraph=debug,info"),
            2 => EnvFilter::new("sitegraph=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
