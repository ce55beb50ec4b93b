use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Result record for a single discovered URL
///
/// A record is created as a placeholder the first time its URL is
/// discovered and mutated exactly once when the URL reaches a terminal
/// state. Which optional fields are set encodes how far the URL got:
///
/// | state                    | scanned_at | status_code |
/// |--------------------------|------------|-------------|
/// | discovered, never fetched| None       | None        |
/// | robots-skipped           | Some       | None        |
/// | transport failure        | Some       | None        |
/// | fetched                  | Some       | Some        |
///
/// Absent fields serialize as JSON null, keeping the record shape fixed
/// for consumers.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    /// Canonical URL identity of this page
    pub url: String,

    /// UTC time the URL was processed, second precision
    pub scanned_at: Option<String>,

    /// Final HTTP status, absent on transport failure or pre-fetch
    pub status_code: Option<u16>,

    /// Page title, absent when missing or for non-HTML responses
    pub title: Option<String>,

    /// Whether the page had any `<h1>` element
    pub h1_present: Option<bool>,

    /// Text of each `<h1>` in document order, empty texts dropped
    pub h1_contents: Option<Vec<String>>,

    /// Canonical URLs of same-origin pages linking here, sorted ascending;
    /// filled in once when the crawl finishes
    pub linked_from: Vec<String>,
}

impl PageRecord {
    /// Creates the placeholder record for a newly discovered URL
    ///
    /// All fetch-dependent fields start absent.
    pub fn placeholder(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scanned_at: None,
            status_code: None,
            title: None,
            h1_present: None,
            h1_contents: None,
            linked_from: Vec::new(),
        }
    }

    /// Marks the record as processed without a fetch (robots-skipped)
    ///
    /// Sets the scan timestamp and leaves every fetch field absent.
    pub fn mark_skipped(&mut self) {
        self.scanned_at = Some(utc_now_iso());
        self.status_code = None;
        self.title = None;
        self.h1_present = None;
        self.h1_contents = None;
    }
}

/// Current UTC time as an ISO-8601 string with second precision
pub fn utc_now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}
