use std::fmt;
use std::hash::{Hash, Hasher};

use url::Url;

/// Fully resolved absolute URL used as the identity key for resources.
///
/// Only the normalizer and the path resolver construct these, so every value
/// is absolute, has no empty or dot segments, carries the base query (if any)
/// and never carries a fragment. Equality, hashing and ordering all go
/// through the serialized string.
#[derive(Debug, Clone)]
pub struct CanonicalUrl {
    url: Url,
}

impl CanonicalUrl {
    pub(crate) fn from_url(url: Url) -> Self {
        Self { url }
    }

    /// Serialized form, e.g. `"https://foo.bar/v1/baz?a=b"`.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Parsed form, for collaborators that issue requests.
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Path component without the query, e.g. `"/v1/baz"`.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// True when the path ends with `/` (a directory-like resource).
    pub fn is_directory(&self) -> bool {
        self.url.path().ends_with('/')
    }

    /// `(scheme, host, port)` of the URL; used to check that a derived URL
    /// stays on the base's authority.
    pub(crate) fn origin_key(&self) -> (&str, Option<&str>, Option<u16>) {
        (
            self.url.scheme(),
            self.url.host_str(),
            self.url.port_or_known_default(),
        )
    }
}

impl PartialEq for CanonicalUrl {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for CanonicalUrl {}

impl Hash for CanonicalUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for CanonicalUrl {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalUrl {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for CanonicalUrl {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for CanonicalUrl {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl serde::Serialize for CanonicalUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
