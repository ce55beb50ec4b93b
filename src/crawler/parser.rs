//! HTML metadata and link extraction
//!
//! Parses fetched HTML to extract the page title, `<h1>` headings and the
//! raw `href` values of anchor tags. Hrefs are returned exactly as written
//! in the document, in document order; resolving and filtering them is the
//! crawl engine's job.

use scraper::{Html, Selector};

/// Metadata and links extracted from one HTML document
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Trimmed `<title>` text, None when missing or whitespace-only
    pub title: Option<String>,

    /// True iff the document contains any `<h1>` element
    pub h1_present: bool,

    /// Text content of each `<h1>` in document order, empty texts dropped
    pub h1_contents: Vec<String>,

    /// Raw href attribute values of `<a>` elements, in document order
    pub links: Vec<String>,
}

/// Parses an HTML document into its crawl-relevant parts
///
/// # Examples
///
/// ```
/// use sitegraph::crawler::parse_html;
///
/// let html = r#"<html><head><title>Hi</title></head>
///     <body><h1>Welcome</h1><a href="/next">next</a></body></html>"#;
/// let page = parse_html(html);
/// assert_eq!(page.title.as_deref(), Some("Hi"));
/// assert!(page.h1_present);
/// assert_eq!(page.links, vec!["/next"]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        h1_present: has_h1(&document),
        h1_contents: extract_h1_texts(&document),
        links: extract_hrefs(&document),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn has_h1(document: &Html) -> bool {
    match Selector::parse("h1") {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

fn extract_h1_texts(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("h1") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| {
            // Join text fragments with single spaces, like a rendered
            // heading reads
            element
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect()
}

fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
