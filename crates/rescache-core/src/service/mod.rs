//! Service context and identity-stable resource handles.
//!
//! A [`Service`] is anchored to one normalized base URL and owns the
//! registry of every [`Resource`] resolved through it:
//! - paths resolve below the base (leading `/` ignored)
//! - the base query is carried by every derived URL
//! - one handle per canonical URL, however it was reached
//!
//! Handles are created lazily and live as long as the service.

mod registry;
mod resource;

use std::fmt;
use std::sync::Arc;

pub use registry::ResourceRegistry;
pub use resource::Resource;

use crate::config::ServiceConfig;
use crate::error::ResolveError;
use crate::resolver;
use crate::url_model::{BaseUrl, CanonicalUrl};

pub(crate) struct ServiceInner {
    name: Option<String>,
    base: BaseUrl,
    registry: ResourceRegistry,
}

impl Drop for ServiceInner {
    fn drop(&mut self) {
        tracing::debug!(
            base = %self.base,
            resources = self.registry.len(),
            "service released"
        );
    }
}

/// Handle to a service. Clones share the same base and resource cache.
///
/// Equality is identity: two `Service` values are equal only if they are
/// clones of the same service, even when their bases match.
#[derive(Clone)]
pub struct Service {
    inner: Arc<ServiceInner>,
}

impl Service {
    /// Creates a service for `base`, normalizing it first.
    ///
    /// Fails with `InvalidUrl` if `base` is not an absolute URL with a host.
    pub fn new(base: &str) -> Result<Self, ResolveError> {
        Self::build(None, base)
    }

    /// Creates a named service from a configuration entry.
    pub fn from_config(cfg: &ServiceConfig) -> Result<Self, ResolveError> {
        Self::build(Some(cfg.name.clone()), &cfg.base_url)
    }

    fn build(name: Option<String>, base: &str) -> Result<Self, ResolveError> {
        let base = BaseUrl::parse(base)?;
        tracing::debug!(base = %base, name = name.as_deref(), "service created");
        Ok(Self {
            inner: Arc::new(ServiceInner {
                name,
                base,
                registry: ResourceRegistry::new(),
            }),
        })
    }

    pub(crate) fn from_inner(inner: Arc<ServiceInner>) -> Self {
        Self { inner }
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.inner.base
    }

    /// Resource for `path` below the base.
    ///
    /// `"/foo"` and `"foo"` return the same handle; repeated calls return the
    /// same handle.
    pub fn resource(&self, path: &str) -> Result<Arc<Resource>, ResolveError> {
        let url = resolver::resolve(&self.inner.base, path)?;
        Ok(self.resource_at(url))
    }

    /// Get-or-create for an already resolved URL.
    pub(crate) fn resource_at(&self, url: CanonicalUrl) -> Arc<Resource> {
        let owner = Arc::downgrade(&self.inner);
        self.inner
            .registry
            .get_or_insert_with(url, |url| Resource::new(url, owner))
    }

    /// Cached handle for `url`, if it has been resolved before.
    pub fn cached(&self, url: &CanonicalUrl) -> Option<Arc<Resource>> {
        self.inner.registry.get(url)
    }

    /// Sorted URLs of every resource resolved so far.
    pub fn cached_urls(&self) -> Vec<CanonicalUrl> {
        self.inner.registry.urls()
    }

    /// Number of cached resources.
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.registry.is_empty()
    }
}

impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Service {}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.inner.name)
            .field("base", &self.inner.base.as_str())
            .field("resources", &self.inner.registry.len())
            .finish()
    }
}
