//! Base URL normalization.

use url::Url;

use super::canonical::CanonicalUrl;
use super::path::PathSegments;
use crate::error::ResolveError;

/// Normalized root URL of a service.
///
/// The path always ends with exactly one `/` (inserted before any query),
/// the query is kept character-for-character and a fragment is dropped.
/// Bases whose query the URL parser would re-encode are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    canonical: CanonicalUrl,
    path: PathSegments,
}

impl BaseUrl {
    /// Parses and normalizes a raw base string.
    ///
    /// # Examples
    ///
    /// - `"http://foo.bar"` → `"http://foo.bar/"`
    /// - `"http://foo.bar/baz"` → `"http://foo.bar/baz/"`
    /// - `"http://foo.bar?x=y"` → `"http://foo.bar/?x=y"`
    /// - `"http://foo.bar?q=a b"` → `InvalidUrl` (the query would be re-encoded)
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let trimmed = raw.trim();
        let mut url =
            Url::parse(trimmed).map_err(|e| ResolveError::invalid_url(raw, e.to_string()))?;

        if url.cannot_be_a_base() {
            return Err(ResolveError::invalid_url(raw, "not a hierarchical URL"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ResolveError::invalid_url(raw, "missing host"));
        }

        if url.query() != raw_query(trimmed) {
            return Err(ResolveError::invalid_url(
                raw,
                "query must already be percent-encoded; it is kept exactly as supplied",
            ));
        }

        url.set_fragment(None);

        let mut path = PathSegments::of_url(&url);
        path.directory = true;
        url.set_path(&path.render());

        // set_path may re-encode; read back what the URL actually holds.
        let path = PathSegments::of_url(&url);
        tracing::trace!(raw, base = %url, "normalized base URL");

        Ok(Self {
            canonical: CanonicalUrl::from_url(url),
            path,
        })
    }

    pub fn as_canonical(&self) -> &CanonicalUrl {
        &self.canonical
    }

    pub fn as_str(&self) -> &str {
        self.canonical.as_str()
    }

    pub fn as_url(&self) -> &Url {
        self.canonical.as_url()
    }

    pub fn query(&self) -> Option<&str> {
        self.canonical.query()
    }

    /// Segments of the base path, e.g. `["v1"]` for `https://foo.bar/v1/`.
    pub fn segments(&self) -> &[String] {
        self.path.segments()
    }

    /// Number of base path segments; traversal may not pop below this.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// True when `url` is on this base's authority and below its path.
    pub fn contains(&self, url: &CanonicalUrl) -> bool {
        if url.origin_key() != self.canonical.origin_key() {
            return false;
        }
        let path = PathSegments::of_url(url.as_url());
        path.segments().starts_with(self.segments())
    }
}

/// Query text as written: after the first `?`, up to any `#`.
fn raw_query(raw: &str) -> Option<&str> {
    let without_fragment = raw.split_once('#').map_or(raw, |(before, _)| before);
    without_fragment.split_once('?').map(|(_, query)| query)
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BaseUrl {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
