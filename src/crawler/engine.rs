//! Crawl engine - breadth-first traversal of the same-origin link graph
//!
//! The engine owns all run state: the FIFO frontier, the discovered and
//! scanned sets, the record map and the backlink map. One URL is dequeued,
//! fetched and fully processed (including link discovery) before the next;
//! FIFO order is what makes the traversal breadth-first, with ties among a
//! page's links broken by their order of appearance.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::parser::{parse_html, ParsedPage};
use crate::output::CrawlStats;
use crate::robots::{load_robots, RobotsRules};
use crate::state::{utc_now_iso, PageRecord};
use crate::url::{canonicalize, matches_path_prefix, Origin};
use crate::CrawlError;
use reqwest::Client;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use url::Url;

/// Final output of a crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// One record per discovered URL, sorted by canonical URL ascending
    pub pages: Vec<PageRecord>,

    /// Aggregate statistics for the run
    pub stats: CrawlStats,
}

/// A single crawl run and all of its state
///
/// Per-URL lifecycle: a URL enters `discovered` (and gets a placeholder
/// record) the first time it passes canonicalization and the origin and
/// path-prefix filters; it enters `scanned` exactly once, when it is
/// dequeued and reaches a terminal outcome (fetched, transport failure or
/// robots-skipped). The `discovered` set gates enqueueing, so no URL can
/// sit in the frontier twice.
pub struct CrawlSession {
    config: CrawlConfig,
    client: Client,
    start_url: Url,
    origin: Origin,
    frontier: VecDeque<Url>,
    discovered: HashSet<String>,
    scanned: HashSet<String>,
    records: BTreeMap<String, PageRecord>,
    backlinks: HashMap<String, BTreeSet<String>>,
    stats: CrawlStats,
}

impl CrawlSession {
    /// Creates a session, validating the run preconditions
    ///
    /// This is the only fallible step of a crawl and performs no network
    /// access: the start URL must canonicalize, and when a path prefix is
    /// configured the canonical start URL must match it.
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Ready to run, frontier seeded with the start URL
    /// * `Err(CrawlError)` - Invalid start URL or path-prefix mismatch
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let parsed = Url::parse(&config.start_url)
            .map_err(|_| CrawlError::InvalidStartUrl(config.start_url.clone()))?;
        let start_url = canonicalize(&config.start_url, &parsed)
            .ok_or_else(|| CrawlError::InvalidStartUrl(config.start_url.clone()))?;
        let origin = Origin::of(&start_url)
            .ok_or_else(|| CrawlError::InvalidStartUrl(config.start_url.clone()))?;

        if let Some(prefix) = config.path_prefix.as_deref() {
            if !matches_path_prefix(&start_url, Some(prefix)) {
                return Err(CrawlError::PrefixMismatch {
                    url: start_url.to_string(),
                    prefix: prefix.to_string(),
                });
            }
        }

        let client = build_http_client(&config.user_agent, config.timeout_secs)?;

        let start_key = start_url.to_string();
        let mut session = Self {
            config,
            client,
            start_url: start_url.clone(),
            origin,
            frontier: VecDeque::new(),
            discovered: HashSet::new(),
            scanned: HashSet::new(),
            records: BTreeMap::new(),
            backlinks: HashMap::new(),
            stats: CrawlStats::default(),
        };

        session.discovered.insert(start_key.clone());
        session
            .records
            .insert(start_key.clone(), PageRecord::placeholder(start_key.as_str()));
        session.frontier.push_back(start_url);

        Ok(session)
    }

    /// The canonical start URL of this session
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// Runs the crawl to completion
    ///
    /// Loops until the frontier is empty or the processed-page count
    /// reaches the configured limit, whichever comes first. All per-URL
    /// failures are absorbed into records and statistics; nothing after
    /// session creation can fail the run.
    pub async fn run(mut self) -> CrawlReport {
        let robots = if self.config.respect_robots {
            load_robots(&self.client, &self.origin).await
        } else {
            RobotsRules::allow_all()
        };

        tracing::info!(
            "starting crawl from {} (max {} pages)",
            self.start_url,
            self.config.max_pages
        );

        while self.stats.pages_crawled < self.config.max_pages {
            let Some(url) = self.frontier.pop_front() else {
                break;
            };

            // The discovered-set gate means a URL cannot be queued twice;
            // re-processing a scanned URL is checked anyway and is a no-op.
            if self.scanned.contains(url.as_str()) {
                continue;
            }

            if robots.is_blocked(&url) {
                tracing::debug!("robots.txt skip: {}", url);
                self.mark_skipped(&url);
                continue;
            }

            self.process_url(&url).await;

            if self.stats.pages_crawled % 10 == 0 {
                tracing::info!(
                    "progress: {} processed, {} discovered, {} queued",
                    self.stats.pages_crawled,
                    self.discovered.len(),
                    self.frontier.len()
                );
            }
        }

        self.finish()
    }

    /// Marks a dequeued URL as processed without fetching it
    fn mark_skipped(&mut self, url: &Url) {
        let key = url.as_str();
        self.scanned.insert(key.to_string());
        self.records
            .entry(key.to_string())
            .or_insert_with(|| PageRecord::placeholder(key))
            .mark_skipped();
        self.stats.pages_crawled += 1;
    }

    /// Fetches one URL and applies its terminal outcome
    async fn process_url(&mut self, url: &Url) {
        let key = url.as_str().to_string();

        self.records
            .entry(key.clone())
            .or_insert_with(|| PageRecord::placeholder(key.as_str()))
            .scanned_at = Some(utc_now_iso());

        match fetch_page(&self.client, &key).await {
            FetchOutcome::Response {
                status,
                content_type,
                body,
            } => {
                self.scanned.insert(key.clone());
                self.stats.pages_crawled += 1;

                if status >= 400 {
                    self.stats.record_error(Some(status));
                }

                // Non-HTML responses keep their status but carry no page
                // metadata and yield no links
                if !content_type.contains("text/html") {
                    if let Some(record) = self.records.get_mut(&key) {
                        record.status_code = Some(status);
                        record.title = None;
                        record.h1_present = Some(false);
                        record.h1_contents = Some(Vec::new());
                    }
                    self.stats.record_page(None, false);
                    tracing::debug!("{} {} (non-HTML: {})", status, key, content_type);
                    return;
                }

                let ParsedPage {
                    title,
                    h1_present,
                    h1_contents,
                    links,
                } = parse_html(&body);

                self.stats.record_page(title.as_deref(), h1_present);
                if let Some(record) = self.records.get_mut(&key) {
                    record.status_code = Some(status);
                    record.title = title;
                    record.h1_present = Some(h1_present);
                    record.h1_contents = Some(h1_contents);
                }

                let added = self.discover_links(url, &links);
                tracing::debug!("{} {} (+{} new links)", status, key, added);
            }

            FetchOutcome::TransportError { error } => {
                tracing::warn!("fetch failed for {}: {}", key, error);
                if let Some(record) = self.records.get_mut(&key) {
                    record.status_code = None;
                    record.title = None;
                    record.h1_present = None;
                    record.h1_contents = None;
                }
                self.stats.record_error(None);
                self.scanned.insert(key);
                self.stats.pages_crawled += 1;
            }
        }
    }

    /// Canonicalizes and filters a page's hrefs, recording backlinks and
    /// enqueueing targets seen for the first time
    ///
    /// Returns the number of newly discovered URLs.
    fn discover_links(&mut self, base: &Url, hrefs: &[String]) -> usize {
        let source = base.as_str().to_string();
        let mut added = 0;

        for href in hrefs {
            let Some(target) = canonicalize(href, base) else {
                continue;
            };
            if !self.origin.matches(&target) {
                continue;
            }
            if !matches_path_prefix(&target, self.config.path_prefix.as_deref()) {
                continue;
            }

            let key = target.as_str().to_string();
            self.backlinks
                .entry(key.clone())
                .or_default()
                .insert(source.clone());
            self.records
                .entry(key.clone())
                .or_insert_with(|| PageRecord::placeholder(key.as_str()));

            if self.discovered.insert(key) {
                self.frontier.push_back(target);
                added += 1;
            }
        }

        added
    }

    /// Materializes backlinks into the records and produces the report
    ///
    /// `linked_from` is computed exactly once here, never incrementally;
    /// the record map is a BTreeMap, so the report comes out sorted by
    /// canonical URL.
    fn finish(mut self) -> CrawlReport {
        for (url, record) in self.records.iter_mut() {
            if let Some(sources) = self.backlinks.get(url) {
                record.linked_from = sources.iter().cloned().collect();
            }
        }

        tracing::info!(
            "crawl finished: {} pages processed, {} discovered",
            self.stats.pages_crawled,
            self.discovered.len()
        );

        CrawlReport {
            pages: self.records.into_values().collect(),
            stats: self.stats,
        }
    }
}
