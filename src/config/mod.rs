//! Run configuration for a crawl
//!
//! Unlike a long-running crawler, sitegraph is configured entirely from the
//! command line; this module just defines the configuration value handed to
//! the crawl session, with the same defaults the CLI advertises.

/// Default maximum number of pages to process in one run
pub const DEFAULT_MAX_PAGES: u64 = 500;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 15.0;

/// Default User-Agent header value
pub const DEFAULT_USER_AGENT: &str = "sitegraph/0.1";

/// Configuration for a single crawl run
///
/// Validation of the start URL (and of the path prefix against it) is the
/// crawl session's precondition check, performed before any network access.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// URL the breadth-first traversal starts from
    pub start_url: String,

    /// Maximum number of pages to process (fetched, errored or skipped)
    pub max_pages: u64,

    /// Per-request timeout in seconds
    pub timeout_secs: f64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Whether to honor robots.txt Disallow rules for the wildcard agent
    pub respect_robots: bool,

    /// Optional path prefix; URLs outside it are never enqueued
    pub path_prefix: Option<String>,
}

impl CrawlConfig {
    /// Creates a configuration with the default limits for a start URL
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            max_pages: DEFAULT_MAX_PAGES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            respect_robots: false,
            path_prefix: None,
        }
    }
}
