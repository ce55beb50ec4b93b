//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full crawl cycle end-to-end: frontier discipline, robots handling,
//! backlink accumulation, error absorption and report shape.

use sitegraph::config::CrawlConfig;
use sitegraph::crawler::CrawlSession;
use sitegraph::output::ErrorKind;
use sitegraph::state::PageRecord;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a short timeout
fn test_config(start_url: &str) -> CrawlConfig {
    CrawlConfig {
        start_url: start_url.to_string(),
        max_pages: 100,
        timeout_secs: 5.0,
        user_agent: "sitegraph-test/0.1".to_string(),
        respect_robots: false,
        path_prefix: None,
    }
}

/// Mounts an HTML page at the given path
async fn mount_page(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn find<'a>(pages: &'a [PageRecord], suffix: &str) -> &'a PageRecord {
    pages
        .iter()
        .find(|p| p.url.ends_with(suffix))
        .unwrap_or_else(|| panic!("no record for {}", suffix))
}

#[tokio::test]
async fn test_single_page_without_links() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "<html><head><title>Lonely</title></head><body><h1>Only page</h1></body></html>".to_string(),
    )
    .await;

    let session = CrawlSession::new(test_config(&format!("{}/", server.uri()))).unwrap();
    let report = session.run().await;

    assert_eq!(report.pages.len(), 1);
    let page = &report.pages[0];
    assert_eq!(page.status_code, Some(200));
    assert_eq!(page.title.as_deref(), Some("Lonely"));
    assert_eq!(page.h1_present, Some(true));
    assert_eq!(page.h1_contents.as_deref(), Some(&["Only page".to_string()][..]));
    assert!(page.scanned_at.is_some());
    assert!(page.linked_from.is_empty());

    assert_eq!(report.stats.pages_crawled, 1);
    assert_eq!(report.stats.pages_without_title, 0);
    assert_eq!(report.stats.pages_without_h1, 0);
    assert!(report.stats.error_counts.is_empty());
}

#[tokio::test]
async fn test_mutual_links_produce_backlinks() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/a",
        r#"<html><head><title>A</title></head><body><a href="/b">to b</a></body></html>"#.to_string(),
    )
    .await;
    mount_page(
        &server,
        "/b",
        r#"<html><head><title>B</title></head><body><a href="/a">to a</a></body></html>"#.to_string(),
    )
    .await;

    let session = CrawlSession::new(test_config(&format!("{}/a", server.uri()))).unwrap();
    let report = session.run().await;

    assert_eq!(report.pages.len(), 2);
    let a = find(&report.pages, "/a");
    let b = find(&report.pages, "/b");
    assert_eq!(a.linked_from, vec![b.url.clone()]);
    assert_eq!(b.linked_from, vec![a.url.clone()]);
    assert_eq!(report.stats.pages_crawled, 2);
}

#[tokio::test]
async fn test_results_sorted_by_url() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/zebra">z</a><a href="/alpha">a</a></body></html>"#.to_string(),
    )
    .await;
    mount_page(&server, "/zebra", "<html><body></body></html>".to_string()).await;
    mount_page(&server, "/alpha", "<html><body></body></html>".to_string()).await;

    let session = CrawlSession::new(test_config(&format!("{}/", server.uri()))).unwrap();
    let report = session.run().await;

    let urls: Vec<_> = report.pages.iter().map(|p| p.url.clone()).collect();
    let mut sorted = urls.clone();
    sorted.sort();
    assert_eq!(urls, sorted);
}

#[tokio::test]
async fn test_robots_disallow_skips_without_fetching() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nDisallow: /private")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/private/page">secret</a><a href="/open">open</a></body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&server, "/open", "<html><body></body></html>".to_string()).await;

    // The blocked page must never be requested
    Mock::given(method("GET"))
        .and(path("/private/page"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&format!("{}/", server.uri()));
    config.respect_robots = true;
    let report = CrawlSession::new(config).unwrap().run().await;

    let blocked = find(&report.pages, "/private/page");
    assert!(blocked.scanned_at.is_some());
    assert!(blocked.status_code.is_none());
    assert!(blocked.title.is_none());
    assert!(blocked.h1_present.is_none());

    // The skip still counts toward the processed-page total, with no error
    assert_eq!(report.stats.pages_crawled, 3);
    assert!(report.stats.error_counts.is_empty());
}

#[tokio::test]
async fn test_robots_ignored_when_not_respected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nDisallow: /")
                .insert_header("content-type", "text/plain"),
        )
        .expect(0)
        .mount(&server)
        .await;

    mount_page(&server, "/", "<html><head><title>Open</title></head></html>".to_string()).await;

    let report = CrawlSession::new(test_config(&format!("{}/", server.uri())))
        .unwrap()
        .run()
        .await;

    assert_eq!(report.pages[0].status_code, Some(200));
}

#[tokio::test]
async fn test_missing_robots_fails_open() {
    let server = MockServer::start().await;
    // No /robots.txt mock mounted; wiremock answers 404
    mount_page(&server, "/", "<html><head><title>Home</title></head></html>".to_string()).await;

    let mut config = test_config(&format!("{}/", server.uri()));
    config.respect_robots = true;
    let report = CrawlSession::new(config).unwrap().run().await;

    assert_eq!(report.stats.pages_crawled, 1);
    assert_eq!(report.pages[0].status_code, Some(200));
}

#[tokio::test]
async fn test_max_pages_leaves_discovered_placeholders() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/a">a</a><a href="/b">b</a></body></html>"#.to_string(),
    )
    .await;

    for blocked in ["/a", "/b"] {
        Mock::given(method("GET"))
            .and(path(blocked))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
    }

    let mut config = test_config(&format!("{}/", server.uri()));
    config.max_pages = 1;
    let report = CrawlSession::new(config).unwrap().run().await;

    assert_eq!(report.stats.pages_crawled, 1);
    assert_eq!(report.pages.len(), 3);

    for suffix in ["/a", "/b"] {
        let placeholder = find(&report.pages, suffix);
        assert!(placeholder.scanned_at.is_none());
        assert!(placeholder.status_code.is_none());
        assert!(placeholder.title.is_none());
        assert!(placeholder.h1_present.is_none());
        assert!(placeholder.h1_contents.is_none());
        // Discovered via the start page, so the backlink is still recorded
        assert_eq!(placeholder.linked_from.len(), 1);
    }
}

#[tokio::test]
async fn test_transport_error_is_absorbed() {
    // Grab a port with no listener
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = test_config(&format!("http://{}/", addr));
    config.timeout_secs = 2.0;
    let report = CrawlSession::new(config).unwrap().run().await;

    assert_eq!(report.pages.len(), 1);
    let page = &report.pages[0];
    assert!(page.scanned_at.is_some());
    assert!(page.status_code.is_none());
    assert!(page.title.is_none());
    assert!(page.h1_present.is_none());
    assert!(page.h1_contents.is_none());

    assert_eq!(report.stats.pages_crawled, 1);
    assert_eq!(report.stats.error_counts[&ErrorKind::ConnectionError], 1);
}

#[tokio::test]
async fn test_non_html_response_yields_no_links() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/feed">feed</a></body></html>"#.to_string(),
    )
    .await;

    // An HTML-looking body behind a non-HTML content type must not be parsed
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><a href="/hidden">x</a></body></html>"#)
                .insert_header("content-type", "application/xml"),
        )
        .mount(&server)
        .await;

    let report = CrawlSession::new(test_config(&format!("{}/", server.uri())))
        .unwrap()
        .run()
        .await;

    let feed = find(&report.pages, "/feed");
    assert_eq!(feed.status_code, Some(200));
    assert_eq!(feed.title, None);
    assert_eq!(feed.h1_present, Some(false));
    assert_eq!(feed.h1_contents.as_deref(), Some(&[][..]));

    assert!(report.pages.iter().all(|p| !p.url.ends_with("/hidden")));
    assert_eq!(report.stats.pages_crawled, 2);
}

#[tokio::test]
async fn test_http_error_status_is_counted_and_links_followed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/gone">gone</a></body></html>"#.to_string(),
    )
    .await;

    // A 404 with an HTML body still has its links discovered
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"<html><title>Not Found</title><body><a href="/next">next</a></body></html>"#)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/next", "<html><body></body></html>".to_string()).await;

    let report = CrawlSession::new(test_config(&format!("{}/", server.uri())))
        .unwrap()
        .run()
        .await;

    let gone = find(&report.pages, "/gone");
    assert_eq!(gone.status_code, Some(404));
    assert_eq!(report.stats.error_counts[&ErrorKind::HttpStatus(404)], 1);

    let next = find(&report.pages, "/next");
    assert_eq!(next.status_code, Some(200));
}

#[tokio::test]
async fn test_path_prefix_limits_discovery() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/docs/",
        r#"<html><body><a href="/docs/guide">guide</a><a href="/blog/post">post</a></body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&server, "/docs/guide", "<html><body></body></html>".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/blog/post"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&format!("{}/docs/", server.uri()));
    config.path_prefix = Some("/docs".to_string());
    let report = CrawlSession::new(config).unwrap().run().await;

    assert_eq!(report.pages.len(), 2);
    assert!(report.pages.iter().all(|p| !p.url.contains("/blog/")));
}

#[tokio::test]
async fn test_fragments_and_asset_links_do_not_create_pages() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/page",
        r##"<html><body>
            <a href="#top">top</a>
            <a href="/logo.png">logo</a>
            <a href="mailto:admin@example.com">mail</a>
        </body></html>"##
            .to_string(),
    )
    .await;

    let report = CrawlSession::new(test_config(&format!("{}/page", server.uri())))
        .unwrap()
        .run()
        .await;

    // Only the page itself; the fragment link resolves to it and records a
    // self-backlink
    assert_eq!(report.pages.len(), 1);
    let page = &report.pages[0];
    assert_eq!(page.linked_from, vec![page.url.clone()]);
    assert_eq!(report.stats.pages_crawled, 1);
}

#[tokio::test]
async fn test_duplicate_links_processed_once() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body>
            <a href="/target">1</a>
            <a href="/target">2</a>
            <a href="/target#section">3</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&server, "/target", "<html><body></body></html>".to_string()).await;

    let report = CrawlSession::new(test_config(&format!("{}/", server.uri())))
        .unwrap()
        .run()
        .await;

    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.stats.pages_crawled, 2);

    // Every processed URL is unique
    let mut urls: Vec<_> = report.pages.iter().map(|p| p.url.clone()).collect();
    urls.dedup();
    assert_eq!(urls.len(), report.pages.len());
}

#[tokio::test]
async fn test_missing_title_and_h1_counted() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<html><body><p>bare</p></body></html>".to_string()).await;

    let report = CrawlSession::new(test_config(&format!("{}/", server.uri())))
        .unwrap()
        .run()
        .await;

    assert_eq!(report.stats.pages_without_title, 1);
    assert_eq!(report.stats.pages_without_h1, 1);
    let page = &report.pages[0];
    assert_eq!(page.title, None);
    assert_eq!(page.h1_present, Some(false));
}

#[tokio::test]
async fn test_report_serializes_to_json_file() {
    use sitegraph::output::{render_json, write_report_file};

    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "<html><head><title>Out</title></head><body><h1>Hi</h1></body></html>".to_string(),
    )
    .await;

    let report = CrawlSession::new(test_config(&format!("{}/", server.uri())))
        .unwrap()
        .run()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("report.json");
    let json = render_json(&report.pages, true).unwrap();
    write_report_file(&out_path, &json).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Out");
    assert_eq!(records[0]["h1_present"], true);
    assert_eq!(records[0]["h1_contents"], serde_json::json!(["Hi"]));
    assert_eq!(records[0]["linked_from"], serde_json::json!([]));
}
