//! Identity cache: canonical URL -> shared resource handle.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::resource::Resource;
use crate::url_model::CanonicalUrl;

/// Per-service registry of resource handles.
///
/// Lookups take the shared read lock; creation takes the write lock and goes
/// through `entry().or_insert_with_key`, so two racing callers for the same
/// URL always end up with the same `Arc`. Entries are never evicted.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    entries: RwLock<HashMap<CanonicalUrl, Arc<Resource>>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Insertion is a single map call, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<CanonicalUrl, Arc<Resource>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CanonicalUrl, Arc<Resource>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Existing handle for `url`, without creating one.
    pub fn get(&self, url: &CanonicalUrl) -> Option<Arc<Resource>> {
        self.read().get(url).cloned()
    }

    /// Returns the handle for `url`, creating it with `make` on first use.
    ///
    /// `make` runs at most once per URL for the lifetime of the registry.
    pub fn get_or_insert_with<F>(&self, url: CanonicalUrl, make: F) -> Arc<Resource>
    where
        F: FnOnce(CanonicalUrl) -> Resource,
    {
        if let Some(existing) = self.get(&url) {
            tracing::trace!(url = %url, "resource cache hit");
            return existing;
        }

        let mut entries = self.write();
        let handle = entries.entry(url).or_insert_with_key(|url| {
            tracing::debug!(url = %url, "creating resource");
            Arc::new(make(url.clone()))
        });
        Arc::clone(handle)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Sorted snapshot of every cached URL.
    pub fn urls(&self) -> Vec<CanonicalUrl> {
        let mut urls: Vec<CanonicalUrl> = self.read().keys().cloned().collect();
        urls.sort();
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Weak;

    use crate::url_model::normalize;

    fn detached(url: CanonicalUrl) -> Resource {
        Resource::new(url, Weak::new())
    }

    #[test]
    fn same_url_same_handle() {
        let registry = ResourceRegistry::new();
        let url = normalize("https://foo.bar/a").unwrap();
        let a = registry.get_or_insert_with(url.clone(), detached);
        let b = registry.get_or_insert_with(url.clone(), detached);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&registry.get(&url).unwrap(), &a));
    }

    #[test]
    fn make_runs_once_per_url() {
        let registry = ResourceRegistry::new();
        let calls = AtomicUsize::new(0);
        let url = normalize("https://foo.bar/a").unwrap();
        for _ in 0..5 {
            registry.get_or_insert_with(url.clone(), |u| {
                calls.fetch_add(1, Ordering::SeqCst);
                detached(u)
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn urls_snapshot_is_sorted() {
        let registry = ResourceRegistry::new();
        assert!(registry.is_empty());
        for raw in ["https://foo.bar/c", "https://foo.bar/a", "https://foo.bar/b"] {
            registry.get_or_insert_with(normalize(raw).unwrap(), detached);
        }
        let urls: Vec<String> = registry.urls().iter().map(|u| u.to_string()).collect();
        assert_eq!(
            urls,
            ["https://foo.bar/a/", "https://foo.bar/b/", "https://foo.bar/c/"]
        );
    }

    #[test]
    fn racing_threads_share_one_handle() {
        let registry = ResourceRegistry::new();
        let url = normalize("https://foo.bar/hot").unwrap();
        let handles: Vec<Arc<Resource>> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..16)
                .map(|_| s.spawn(|| registry.get_or_insert_with(url.clone(), detached)))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.len(), 1);
    }
}
