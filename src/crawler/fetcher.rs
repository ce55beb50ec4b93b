//! HTTP fetcher
//!
//! All network access for a crawl goes through one reqwest client built
//! here: a fixed User-Agent, the configured per-request timeout, and
//! transparent redirect following. The engine only ever sees the final
//! status, content-type and body, or a transport-error signal. A URL gets
//! exactly one fetch attempt per run; nothing is retried.

use reqwest::Client;
use std::time::Duration;

/// Outcome of fetching one URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered; any status code, including 4xx/5xx
    Response {
        /// Final HTTP status after redirects
        status: u16,
        /// Lowercased Content-Type header value, empty when missing
        content_type: String,
        /// Response body
        body: String,
    },

    /// The request never produced a response (DNS, connect, timeout, TLS,
    /// or a failure while reading the body)
    TransportError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by every request in a run
///
/// # Arguments
///
/// * `user_agent` - Value of the User-Agent header
/// * `timeout_secs` - Per-request timeout in seconds
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout_secs: f64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(Duration::from_secs_f64(timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once, classifying the outcome
///
/// Redirects are followed transparently by the client; the returned status
/// and body belong to the final hop.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_lowercase();

            match response.text().await {
                Ok(body) => FetchOutcome::Response {
                    status,
                    content_type,
                    body,
                },
                Err(e) => FetchOutcome::TransportError {
                    error: format!("failed to read body: {}", e),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            FetchOutcome::TransportError { error }
        }
    }
}
