//! Per-page crawl state
//!
//! Defines the page record type that accumulates a URL's lifecycle from
//! discovery to its terminal fetch outcome.

mod record;

pub use record::{utc_now_iso, PageRecord};
