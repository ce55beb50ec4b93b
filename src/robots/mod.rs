//! Robots.txt handling
//!
//! Fetches and parses `/robots.txt` for the crawl origin. Robots handling
//! fails open: a missing, unfetchable or non-text robots.txt yields an
//! empty rule set and never blocks or aborts a crawl.

mod parser;

pub use parser::RobotsRules;

use crate::crawler::{fetch_page, FetchOutcome};
use crate::url::Origin;
use reqwest::Client;

/// Fetches and parses robots.txt for an origin
///
/// Anything other than a 200 response with a text content-type, including
/// transport errors, is treated as "no rules".
///
/// # Arguments
///
/// * `client` - The shared HTTP client for this run
/// * `origin` - The crawl origin whose `/robots.txt` is fetched
pub async fn load_robots(client: &Client, origin: &Origin) -> RobotsRules {
    let robots_url = format!("{}/robots.txt", origin);

    match fetch_page(client, &robots_url).await {
        FetchOutcome::Response {
            status,
            content_type,
            body,
        } if status == 200 && content_type.contains("text") => {
            let rules = RobotsRules::parse(&body);
            tracing::debug!("loaded {} disallow rules from {}", rules.len(), robots_url);
            rules
        }
        FetchOutcome::Response { status, .. } => {
            tracing::debug!("no usable robots.txt at {} (status {})", robots_url, status);
            RobotsRules::allow_all()
        }
        FetchOutcome::TransportError { error } => {
            tracing::debug!("robots.txt fetch failed for {}: {}", robots_url, error);
            RobotsRules::allow_all()
        }
    }
}
