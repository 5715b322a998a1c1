use std::fmt;
use std::sync::{Arc, Weak};

use super::{Service, ServiceInner};
use crate::error::ResolveError;
use crate::resolver;
use crate::url_model::CanonicalUrl;

/// One addressable endpoint under a service.
///
/// Handles are shared as `Arc<Resource>`: for a given service, every way of
/// reaching the same canonical URL returns the same `Arc`, so `Arc::ptr_eq`
/// is a valid identity check. The back-reference to the service is weak;
/// the service owns its resources, not the other way round.
#[derive(Debug)]
pub struct Resource {
    url: CanonicalUrl,
    service: Weak<ServiceInner>,
}

impl Resource {
    pub(crate) fn new(url: CanonicalUrl, service: Weak<ServiceInner>) -> Self {
        Self { url, service }
    }

    pub fn url(&self) -> &CanonicalUrl {
        &self.url
    }

    /// Owning service, or `None` once the service has been dropped.
    pub fn service(&self) -> Option<Service> {
        self.service.upgrade().map(Service::from_inner)
    }

    /// True when `service` is the service that created this handle.
    pub fn belongs_to(&self, service: &Service) -> bool {
        std::ptr::eq(self.service.as_ptr(), Arc::as_ptr(&service.inner))
    }

    fn owner(&self) -> Result<Service, ResolveError> {
        self.service().ok_or_else(|| ResolveError::ServiceReleased {
            url: self.url.to_string(),
        })
    }

    /// Resource at `subpath` below this one (this resource acts as a directory).
    ///
    /// `foo.child("a/b")` and `service.resource("foo/a/b")` are the same handle.
    pub fn child(&self, subpath: &str) -> Result<Arc<Resource>, ResolveError> {
        let service = self.owner()?;
        let url = resolver::resolve_child(service.base_url(), &self.url, subpath)?;
        Ok(service.resource_at(url))
    }

    /// Resource reached by a browsing-style expression from this one.
    ///
    /// `"../bar"` from `/foo/oogle/baz` is `/foo/bar`; plain subpaths behave
    /// like [`Resource::child`].
    pub fn relative(&self, expr: &str) -> Result<Arc<Resource>, ResolveError> {
        let service = self.owner()?;
        let url = resolver::resolve_relative(service.base_url(), &self.url, expr)?;
        Ok(service.resource_at(url))
    }

    /// Like [`Resource::relative`], passing `None` through.
    ///
    /// Useful for optional links such as a "next page" value that may be absent.
    pub fn optional_relative(
        &self,
        expr: Option<&str>,
    ) -> Result<Option<Arc<Resource>>, ResolveError> {
        expr.map(|e| self.relative(e)).transpose()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({})", self.url)
    }
}
