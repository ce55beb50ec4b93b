//! Sitegraph: a same-origin link graph crawler
//!
//! This crate implements a breadth-first crawler that maps the hyperlink
//! graph reachable from a single start URL, restricted to that URL's origin,
//! recording per-page metadata (title, headings, HTTP status) and the
//! inbound-link graph.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for sitegraph operations
///
/// Only run preconditions are surfaced as errors: per-URL fetch failures,
/// robots.txt fetch failures and non-HTML responses are absorbed into the
/// page records and statistics and never abort a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid start URL: {0}")]
    InvalidStartUrl(String),

    #[error("Start URL {url} does not match path prefix {prefix}")]
    PrefixMismatch { url: String, prefix: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sitegraph operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CrawlReport, CrawlSession};
pub use output::{CrawlStats, ErrorKind};
pub use state::PageRecord;
pub use crate::url::{canonicalize, matches_path_prefix, Origin};
