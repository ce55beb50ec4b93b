use std::fmt;
use url::Url;

/// The (scheme, host[:port]) pair defining "local" for a crawl
///
/// Two URLs belong to the same origin when scheme, host and effective port
/// are equal. The port is `None` when it equals the scheme's default, so a
/// canonical URL and its explicit-default-port spelling compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    /// Extracts the origin of a URL
    ///
    /// # Returns
    ///
    /// * `Some(Origin)` - For URLs with a host
    /// * `None` - For URLs without one
    pub fn of(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_string();
        Some(Self {
            scheme: url.scheme().to_string(),
            host,
            // Url::port() is already None for the scheme's default port
            port: url.port(),
        })
    }

    /// Returns true if `url` belongs to this origin
    pub fn matches(&self, url: &Url) -> bool {
        url.scheme() == self.scheme && url.host_str() == Some(self.host.as_str()) && url.port() == self.port
    }
}

impl fmt::Display for Origin {
    /// Formats as `scheme://host[:port]`, suitable as a base for well-known
    /// paths like `/robots.txt`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}://{}:{}", self.scheme, self.host, port),
            None => write!(f, "{}://{}", self.scheme, self.host),
        }
    }
}
