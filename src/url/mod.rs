//! URL handling for sitegraph
//!
//! This module provides URL canonicalization (the dedup identity of a
//! page), origin extraction and matching, and the optional path-prefix
//! filter.

mod canonical;
mod origin;

use url::Url;

// Re-export main functions
pub use canonical::canonicalize;
pub use origin::Origin;

/// Checks a URL's path against an optional literal prefix
///
/// The prefix is matched with a plain `starts_with`; there is no
/// normalization and no trailing-slash handling. `None` matches everything.
///
/// # Examples
///
/// ```
/// use sitegraph::url::matches_path_prefix;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/docs/intro").unwrap();
/// assert!(matches_path_prefix(&url, Some("/docs")));
/// assert!(!matches_path_prefix(&url, Some("/blog")));
/// assert!(matches_path_prefix(&url, None));
/// ```
pub fn matches_path_prefix(url: &Url, prefix: Option<&str>) -> bool {
    match prefix {
        Some(prefix) => url.path().starts_with(prefix),
        None => true,
    }
}
