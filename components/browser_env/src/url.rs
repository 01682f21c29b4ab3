//! Page URLs and origin comparison.
//!
//! Origin comparison follows the scheme/host/effective-port tuple rule: two
//! URLs are same-origin when all three match after default ports are
//! resolved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors from URL parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The URL has no `scheme://` prefix and is not resolvable.
    MissingScheme(String),
    /// The authority section is empty.
    EmptyHost(String),
    /// The port is not a valid u16.
    InvalidPort(String),
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlError::MissingScheme(url) => write!(f, "URL '{}' has no scheme", url),
            UrlError::EmptyHost(url) => write!(f, "URL '{}' has an empty host", url),
            UrlError::InvalidPort(url) => write!(f, "URL '{}' has an invalid port", url),
        }
    }
}

impl std::error::Error for UrlError {}

/// An absolute URL split into origin, path and query.
///
/// # Examples
///
/// ```
/// use browser_env::PageUrl;
///
/// let page = PageUrl::parse("https://app.example.com/home").unwrap();
/// let link = page.resolve("/settings?tab=1").unwrap();
/// assert!(page.is_same_origin(&link));
/// assert_eq!(link.path(), "/settings");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageUrl {
    scheme: String,
    host: String,
    port: Option<u16>,
    path: String,
    query: Option<String>,
}

impl PageUrl {
    /// Parses an absolute URL. Fragments are dropped; an absent path becomes
    /// `/`.
    pub fn parse(url: &str) -> Result<Self, UrlError> {
        let url = url.trim();
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| UrlError::MissingScheme(url.to_string()))?;

        let (authority, tail) = match rest.find(['/', '?', '#']) {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };

        if authority.is_empty() {
            return Err(UrlError::EmptyHost(url.to_string()));
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => {
                let port = p
                    .parse::<u16>()
                    .map_err(|_| UrlError::InvalidPort(url.to_string()))?;
                (h, Some(port))
            }
            None => (authority, None),
        };

        if host.is_empty() {
            return Err(UrlError::EmptyHost(url.to_string()));
        }

        // Split the tail into path, query, fragment; the fragment never
        // participates in navigation or caching decisions.
        let tail = tail.split('#').next().unwrap_or(tail);
        let (path, query) = match tail.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string())),
            None => (tail, None),
        };
        let path = if path.is_empty() { "/" } else { path };

        Ok(PageUrl {
            scheme: scheme.to_ascii_lowercase(),
            host: host.to_ascii_lowercase(),
            port,
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()),
        })
    }

    /// Resolves an href the way an anchor element would: absolute URLs parse
    /// directly, root-relative and bare-relative hrefs resolve against this
    /// URL.
    pub fn resolve(&self, href: &str) -> Result<PageUrl, UrlError> {
        let href = href.trim();
        if href.contains("://") {
            return PageUrl::parse(href);
        }

        let mut resolved = self.clone();
        let href = href.split('#').next().unwrap_or(href);
        let (path_part, query) = match href.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string())),
            None => (href, None),
        };

        resolved.query = query.filter(|q| !q.is_empty());
        resolved.path = if path_part.starts_with('/') {
            path_part.to_string()
        } else if path_part.is_empty() {
            self.path.clone()
        } else {
            // Relative to the directory of the current path
            match self.path.rfind('/') {
                Some(idx) => format!("{}{}", &self.path[..=idx], path_part),
                None => format!("/{}", path_part),
            }
        };
        Ok(resolved)
    }

    /// URL scheme, lowercased.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host, lowercased.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit port, if the URL carries one.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Port with scheme defaults applied (http 80, https 443).
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(match self.scheme.as_str() {
            "https" => 443,
            "http" => 80,
            _ => 0,
        })
    }

    /// Path component, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string without the leading `?`, if present.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Same-origin check: scheme, host and effective port all match.
    pub fn is_same_origin(&self, other: &PageUrl) -> bool {
        self.scheme == other.scheme
            && self.host == other.host
            && self.effective_port() == other.effective_port()
    }

    /// Returns true when the query string carries the given parameter name.
    pub fn has_query_param(&self, name: &str) -> bool {
        match &self.query {
            Some(q) => q
                .split('&')
                .any(|pair| pair.split('=').next() == Some(name)),
            None => false,
        }
    }

    /// Returns a copy with `name=value` appended to the query string,
    /// joining with `?` or `&` as appropriate.
    pub fn with_query_param(&self, name: &str, value: &str) -> PageUrl {
        let mut out = self.clone();
        out.query = Some(match &self.query {
            Some(q) => format!("{}&{}={}", q, name, value),
            None => format!("{}={}", name, value),
        });
        out
    }

    /// The serialized origin, e.g. `https://app.example.com`.
    pub fn origin_string(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

/// Returns true when a URL string (absolute or relative) carries the given
/// query parameter name.
pub fn has_param(url: &str, name: &str) -> bool {
    let url = url.split('#').next().unwrap_or(url);
    match url.split_once('?') {
        Some((_, query)) => query
            .split('&')
            .any(|pair| pair.split('=').next() == Some(name)),
        None => false,
    }
}

/// Appends `name=value` to a URL string (absolute or relative), joining
/// with `?` or `&` as appropriate.
pub fn append_param(url: &str, name: &str, value: &str) -> String {
    if url.contains('?') {
        format!("{}&{}={}", url, name, value)
    } else {
        format!("{}?{}={}", url, name, value)
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin_string(), self.path)?;
        if let Some(q) = &self.query {
            write!(f, "?{}", q)?;
        }
        Ok(())
    }
}
