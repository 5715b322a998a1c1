//! Error type for base normalization and path resolution.

/// Failure to build a service or resolve a resource URL.
///
/// Errors are returned at the point of the call and never leave a partial
/// service or a cached handle behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The raw base string is not an absolute URL with a host.
    #[error("invalid base URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    /// A path or relative expression cannot be resolved against the base.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The resource outlived the service it was derived from.
    #[error("service for {url} has been released")]
    ServiceReleased { url: String },
}

impl ResolveError {
    pub(crate) fn invalid_url(input: &str, reason: impl Into<String>) -> Self {
        ResolveError::InvalidUrl {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        ResolveError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// True for `InvalidPath`; convenient when matching in callers and tests.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, ResolveError::InvalidPath { .. })
    }

    /// True for `InvalidUrl`.
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, ResolveError::InvalidUrl { .. })
    }
}
