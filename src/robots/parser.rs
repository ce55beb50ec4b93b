//! Robots.txt disallow-rule parsing
//!
//! Sitegraph honors a deliberately reduced subset of robots.txt: only the
//! wildcard (`*`) user-agent sections are read, and `Disallow` values are
//! collected verbatim as literal path prefixes. There is no Allow, no
//! crawl-delay and no wildcard expansion.

use std::collections::HashSet;
use url::Url;

/// Disallow rules collected from a robots.txt body
#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    /// Literal path prefixes blocked for the wildcard user-agent
    prefixes: HashSet<String>,
}

impl RobotsRules {
    /// Creates a permissive rule set that blocks nothing
    ///
    /// Used when robots.txt is absent, unfetchable or ignored by
    /// configuration.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parses a robots.txt body into the wildcard-agent disallow prefixes
    ///
    /// Lines are scanned top-to-bottom. A `user-agent:` line (matched
    /// case-insensitively) opens a section that applies iff its value is
    /// exactly `*`; while inside such a section, every non-empty
    /// `disallow:` value is collected verbatim. Sections for any specific
    /// agent are ignored entirely.
    pub fn parse(content: &str) -> Self {
        let mut prefixes = HashSet::new();
        let mut applies_to_wildcard = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let lower = line.to_lowercase();
            if lower.starts_with("user-agent:") {
                applies_to_wildcard = line
                    .split_once(':')
                    .map(|(_, value)| value.trim() == "*")
                    .unwrap_or(false);
            } else if applies_to_wildcard && lower.starts_with("disallow:") {
                if let Some((_, value)) = line.split_once(':') {
                    let value = value.trim();
                    if !value.is_empty() {
                        prefixes.insert(value.to_string());
                    }
                }
            }
        }

        Self { prefixes }
    }

    /// Returns true if the URL's path starts with any disallowed prefix
    ///
    /// An empty rule set never blocks.
    pub fn is_blocked(&self, url: &Url) -> bool {
        if self.prefixes.is_empty() {
            return false;
        }
        let path = url.path();
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }

    /// Returns the number of collected disallow prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns true if no prefixes were collected
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
