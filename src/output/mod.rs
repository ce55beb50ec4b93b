//! Output generation
//!
//! The JSON report of page records and the human-readable run summary.

mod json;
mod stats;

pub use json::{default_output_path, render_json, write_report_file};
pub use stats::{render_summary, CrawlStats, ErrorKind};
