//! Shared helpers for the integration tests.

use rescache_core::Service;

/// Resolves `path` against a fresh service for `base` and returns the URL.
pub fn expand(base: &str, path: &str) -> String {
    let service = Service::new(base).expect("valid base");
    let resource = service.resource(path).expect("valid path");
    resource.url().to_string()
}

/// Checks `path` with and without a leading slash.
pub fn check_path_expansion(base: &str, path: &str, expected: &str) {
    for variant in [path.to_string(), format!("/{path}")] {
        let actual = expand(base, &variant);
        assert_eq!(
            actual, expected,
            "expected base {base:?} and resource path {variant:?} to expand to {expected:?}, but got {actual:?}"
        );
    }
}

/// Normalized base URL for `raw`.
pub fn expand_base(raw: &str) -> String {
    Service::new(raw)
        .expect("valid base")
        .base_url()
        .as_str()
        .to_string()
}
