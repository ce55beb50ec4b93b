//! JSON report output
//!
//! Serializes the sorted page records and handles where they go: an
//! explicit file, stdout, or an auto-generated path under `crawls/`.

use crate::state::PageRecord;
use crate::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Serializes page records to a JSON array
///
/// The caller is expected to pass records already sorted by canonical URL,
/// as produced by the crawl report.
pub fn render_json(pages: &[PageRecord], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(pages)?
    } else {
        serde_json::to_string(pages)?
    };
    Ok(json)
}

/// Generates the default output path for a run
///
/// Shape: `crawls/{hostname with dots replaced by underscores}_{local
/// timestamp}.json`. Falls back to "unknown" when the start URL has no
/// parseable hostname.
pub fn default_output_path(start_url: &str) -> PathBuf {
    let hostname = Url::parse(start_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());
    let hostname_safe = hostname.replace('.', "_");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    Path::new("crawls").join(format!("{}_{}.json", hostname_safe, timestamp))
}

/// Writes the serialized report to a file, creating parent directories
pub fn write_report_file(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    Ok(())
}
