//! Aggregate crawl statistics
//!
//! Purely additive counters, updated exactly once per processed URL and
//! rendered into the end-of-run summary.

use std::collections::HashMap;
use std::fmt;

/// Category an error count is bucketed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    /// The request never produced an HTTP response
    ConnectionError,

    /// The response carried an error status (>= 400)
    HttpStatus(u16),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionError => write!(f, "connection_error"),
            Self::HttpStatus(code) => write!(f, "{}", code),
        }
    }
}

/// Statistics collected over one crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    /// URLs that reached a terminal state (fetched, errored or skipped)
    pub pages_crawled: u64,

    /// Processed pages with no (or empty) title
    pub pages_without_title: u64,

    /// Processed pages with no `<h1>`
    pub pages_without_h1: u64,

    /// Error occurrences by category
    pub error_counts: HashMap<ErrorKind, u64>,
}

impl CrawlStats {
    /// Records metadata counters for one processed page
    pub fn record_page(&mut self, title: Option<&str>, h1_present: bool) {
        if title.map_or(true, str::is_empty) {
            self.pages_without_title += 1;
        }
        if !h1_present {
            self.pages_without_h1 += 1;
        }
    }

    /// Records an error occurrence
    ///
    /// `None` counts as a connection error; statuses below 400 are not
    /// errors and are ignored.
    pub fn record_error(&mut self, status: Option<u16>) {
        match status {
            None => {
                *self.error_counts.entry(ErrorKind::ConnectionError).or_default() += 1;
            }
            Some(code) if code >= 400 => {
                *self.error_counts.entry(ErrorKind::HttpStatus(code)).or_default() += 1;
            }
            Some(_) => {}
        }
    }
}

/// Renders the end-of-run summary
///
/// Error buckets come out in a fixed order (connection errors first, then
/// ascending status codes) so the summary is deterministic.
pub fn render_summary(stats: &CrawlStats) -> String {
    let mut out = String::new();

    out.push_str(&"=".repeat(50));
    out.push_str("\nCRAWL SUMMARY\n");
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    out.push_str(&format!("Total pages crawled:    {}\n", stats.pages_crawled));
    out.push_str(&format!("Pages without title:    {}\n", stats.pages_without_title));
    out.push_str(&format!("Pages without H1:       {}\n\n", stats.pages_without_h1));

    if stats.error_counts.is_empty() {
        out.push_str("No errors encountered.\n");
    } else {
        out.push_str("Errors by type:\n");
        let mut buckets: Vec<_> = stats.error_counts.iter().collect();
        buckets.sort_by_key(|(kind, _)| **kind);

        for (kind, count) in buckets {
            let label = match kind {
                ErrorKind::ConnectionError => "Connection errors".to_string(),
                ErrorKind::HttpStatus(code) => format!("HTTP {}", code),
            };
            out.push_str(&format!("  {}: {}\n", label, count));
        }
    }

    out
}
