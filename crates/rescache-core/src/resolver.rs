//! Path resolution against a service base.
//!
//! Every function here is pure: it takes the normalized [`BaseUrl`] and
//! returns a [`CanonicalUrl`] or an `InvalidPath` error. Nothing is cached
//! at this layer.

use crate::error::ResolveError;
use crate::url_model::{
    check_path_chars, is_dot_segment, is_parent_segment, split_subpath, BaseUrl, CanonicalUrl,
    PathSegments,
};

/// How a canonical URL was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// Direct path below the base (`Service::resource`).
    Path,
    /// Subpath appended below an existing resource.
    Child,
    /// `./` or `../` expression evaluated from an existing resource.
    Traversal,
}

/// Query string carried by a URL of the given derivation.
///
/// Query parameters belong to the base: every derivation reattaches the
/// base query verbatim, and query text in the argument is rejected before
/// this point.
pub fn query_for(base: &BaseUrl, derivation: Derivation) -> Option<&str> {
    match derivation {
        Derivation::Path | Derivation::Child | Derivation::Traversal => base.query(),
    }
}

/// Builds the canonical URL for `path` on the base's authority.
fn compose(
    base: &BaseUrl,
    path: &PathSegments,
    original: &str,
    derivation: Derivation,
) -> Result<CanonicalUrl, ResolveError> {
    let mut url = base.as_url().clone();
    url.set_path(&path.render());
    url.set_query(query_for(base, derivation));

    // The URL parser must not have merged or split any segment.
    if PathSegments::of_url(&url).len() != path.len() {
        return Err(ResolveError::invalid_path(
            original,
            "path segments do not survive URL encoding",
        ));
    }
    Ok(CanonicalUrl::from_url(url))
}

fn ensure_under(base: &BaseUrl, from: &CanonicalUrl, original: &str) -> Result<(), ResolveError> {
    if base.contains(from) {
        Ok(())
    } else {
        Err(ResolveError::invalid_path(
            original,
            format!("{from} is not under base {base}"),
        ))
    }
}

/// True when the expression starts with a `.` or `..` segment.
fn is_traversal(expr: &str) -> bool {
    expr.split('/').next().map_or(false, is_dot_segment)
}

/// Resolves `path` as a subpath of the base.
///
/// A leading `/` is ignored, so `"/foo"` and `"foo"` give the same URL; the
/// base is never re-rooted.
///
/// # Examples
///
/// - base `https://foo.bar/v1/`, path `"baz/fez"` → `https://foo.bar/v1/baz/fez`
/// - base `https://foo.bar/?a=b`, path `"/baz/"` → `https://foo.bar/baz/?a=b`
pub fn resolve(base: &BaseUrl, path: &str) -> Result<CanonicalUrl, ResolveError> {
    let sub = split_subpath(path)?;
    let mut full = PathSegments {
        segments: base.segments().to_vec(),
        directory: sub.is_directory(),
    };
    full.segments.extend(sub.segments);
    compose(base, &full, path, Derivation::Path)
}

/// Appends `subpath` below `from`, treating `from` as a directory.
///
/// An empty subpath yields `from` itself.
pub fn resolve_child(
    base: &BaseUrl,
    from: &CanonicalUrl,
    subpath: &str,
) -> Result<CanonicalUrl, ResolveError> {
    ensure_under(base, from, subpath)?;
    let sub = split_subpath(subpath)?;
    if sub.is_empty() {
        return Ok(from.clone());
    }

    let mut full = PathSegments::of_url(from.as_url());
    full.directory = sub.is_directory();
    full.segments.extend(sub.segments);
    compose(base, &full, subpath, Derivation::Child)
}

/// Resolves a browsing-style expression from an existing resource.
///
/// Expressions that start with `./` or `../` (or are `.` / `..`) are
/// evaluated like a relative link: from the directory containing `from`,
/// each `..` pops a segment. Popping below the base path is an error.
/// Anything else is a child subpath, see [`resolve_child`].
pub fn resolve_relative(
    base: &BaseUrl,
    from: &CanonicalUrl,
    expr: &str,
) -> Result<CanonicalUrl, ResolveError> {
    if !is_traversal(expr) {
        return resolve_child(base, from, expr);
    }
    ensure_under(base, from, expr)?;
    check_path_chars(expr)?;

    let current = PathSegments::of_url(from.as_url());
    let mut stack = current.segments;
    if !current.directory {
        stack.pop();
    }
    if stack.len() < base.depth() {
        return Err(ResolveError::invalid_path(expr, "resource lies above the base path"));
    }

    let parts: Vec<&str> = expr.split('/').collect();
    for part in &parts {
        if part.is_empty() || (is_dot_segment(part) && !is_parent_segment(part)) {
            continue;
        }
        if is_parent_segment(part) {
            if stack.len() <= base.depth() {
                tracing::debug!(from = %from, expr, "traversal above base rejected");
                return Err(ResolveError::invalid_path(
                    expr,
                    format!("traversal above base {base}"),
                ));
            }
            stack.pop();
        } else {
            stack.push((*part).to_string());
        }
    }

    let directory = parts
        .last()
        .map_or(true, |p| p.is_empty() || is_dot_segment(p));
    let full = PathSegments {
        segments: stack,
        directory,
    };
    compose(base, &full, expr, Derivation::Traversal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(raw: &str) -> BaseUrl {
        BaseUrl::parse(raw).unwrap()
    }

    /// Checks the path both with and without a leading slash.
    fn check_expansion(raw_base: &str, path: &str, expected: &str) {
        let b = base(raw_base);
        for variant in [path.to_string(), format!("/{path}")] {
            let got = resolve(&b, &variant).unwrap();
            assert_eq!(
                got.as_str(),
                expected,
                "base {raw_base:?} path {variant:?}"
            );
        }
    }

    #[test]
    fn resolves_all_paths_as_subpaths_of_base() {
        check_expansion("https://foo.bar", "", "https://foo.bar/");
        check_expansion("https://foo.bar", "baz", "https://foo.bar/baz");
        check_expansion("https://foo.bar", "baz/fez", "https://foo.bar/baz/fez");
        check_expansion("https://foo.bar", "baz/fez/", "https://foo.bar/baz/fez/");
        check_expansion("https://foo.bar/v1", "baz", "https://foo.bar/v1/baz");
        check_expansion("https://foo.bar/v1", "baz/fez", "https://foo.bar/v1/baz/fez");
    }

    #[test]
    fn preserves_base_query_params() {
        check_expansion(
            "https://foo.bar/?a=b&x=y",
            "baz/fez/",
            "https://foo.bar/baz/fez/?a=b&x=y",
        );
        check_expansion(
            "https://foo.bar/v1?a=b&x=y",
            "baz",
            "https://foo.bar/v1/baz?a=b&x=y",
        );
    }

    #[test]
    fn every_derivation_takes_the_base_query() {
        let b = base("https://foo.bar/?k=v");
        for d in [Derivation::Path, Derivation::Child, Derivation::Traversal] {
            assert_eq!(query_for(&b, d), Some("k=v"));
        }
        let plain = base("https://foo.bar/");
        assert_eq!(query_for(&plain, Derivation::Child), None);
    }

    #[test]
    fn path_with_query_or_dots_is_invalid() {
        let b = base("https://foo.bar/v1");
        for path in ["baz?x=1", "../etc", "./baz", "a/../../b", "a#x"] {
            assert!(resolve(&b, path).unwrap_err().is_invalid_path(), "{path:?}");
        }
    }

    #[test]
    fn double_leading_slash_does_not_reroot_host() {
        let b = base("https://foo.bar/v1");
        assert_eq!(
            resolve(&b, "//evil.example/x").unwrap(),
            "https://foo.bar/v1/evil.example/x"
        );
    }

    #[test]
    fn percent_encoding_is_applied_once() {
        let b = base("https://foo.bar");
        let spaced = resolve(&b, "a b").unwrap();
        let encoded = resolve(&b, "a%20b").unwrap();
        assert_eq!(spaced, "https://foo.bar/a%20b");
        assert_eq!(spaced, encoded);
    }

    #[test]
    fn child_matches_direct_path() {
        let b = base("https://foo.bar/v1?q=1");
        let baz = resolve(&b, "baz").unwrap();
        assert_eq!(
            resolve_relative(&b, &baz, "fez").unwrap(),
            resolve(&b, "baz/fez").unwrap()
        );
        assert_eq!(
            resolve_child(&b, &baz, "fez/").unwrap(),
            "https://foo.bar/v1/baz/fez/?q=1"
        );
        assert_eq!(resolve_child(&b, &baz, "").unwrap(), baz);
    }

    #[test]
    fn child_rejects_dot_segments() {
        let b = base("https://foo.bar");
        let foo = resolve(&b, "foo").unwrap();
        assert!(resolve_child(&b, &foo, "../x").unwrap_err().is_invalid_path());
        assert!(resolve_relative(&b, &foo, "a/../b").unwrap_err().is_invalid_path());
    }

    #[test]
    fn parent_traversal_from_nested_child() {
        let b = base("https://zingle.frotz");
        let foo = resolve(&b, "/foo").unwrap();
        let oogle = resolve_child(&b, &foo, "oogle").unwrap();
        let baz = resolve_child(&b, &oogle, "baz").unwrap();
        let bar = resolve_relative(&b, &baz, "../bar").unwrap();
        assert_eq!(bar, resolve(&b, "/foo/bar").unwrap());
    }

    #[test]
    fn traversal_from_directory_resource() {
        let b = base("https://foo.bar/api");
        let dir = resolve(&b, "a/b/").unwrap();
        assert_eq!(resolve_relative(&b, &dir, "../c").unwrap(), "https://foo.bar/api/a/c");
        assert_eq!(resolve_relative(&b, &dir, "./c").unwrap(), "https://foo.bar/api/a/b/c");
        assert_eq!(resolve_relative(&b, &dir, "..").unwrap(), "https://foo.bar/api/a/");
        assert_eq!(resolve_relative(&b, &dir, ".").unwrap(), "https://foo.bar/api/a/b/");
    }

    #[test]
    fn multiple_parent_segments() {
        let b = base("https://foo.bar/api");
        let deep = resolve(&b, "a/b/c/d").unwrap();
        assert_eq!(
            resolve_relative(&b, &deep, "../../x/").unwrap(),
            "https://foo.bar/api/a/x/"
        );
        assert_eq!(
            resolve_relative(&b, &deep, "../../../x").unwrap(),
            "https://foo.bar/api/x"
        );
        assert_eq!(
            resolve_relative(&b, &deep, "../x/../y").unwrap(),
            "https://foo.bar/api/a/b/y"
        );
    }

    #[test]
    fn traversal_past_base_fails() {
        let b = base("https://foo.bar/api?k=v");
        let deep = resolve(&b, "a/b").unwrap();
        assert!(resolve_relative(&b, &deep, "../../").unwrap_err().is_invalid_path());
        assert!(resolve_relative(&b, &deep, "../../../x").unwrap_err().is_invalid_path());

        let root = resolve(&b, "").unwrap();
        assert!(resolve_relative(&b, &root, "..").unwrap_err().is_invalid_path());
        assert!(resolve_relative(&b, &root, "%2e%2e/x").unwrap_err().is_invalid_path());
    }

    #[test]
    fn traversal_to_base_root_is_allowed() {
        let b = base("https://foo.bar/api");
        let a = resolve(&b, "a/").unwrap();
        assert_eq!(resolve_relative(&b, &a, "..").unwrap(), "https://foo.bar/api/");
        assert_eq!(resolve_relative(&b, &a, "..").unwrap(), *b.as_canonical());
    }

    #[test]
    fn from_outside_base_is_rejected() {
        let b = base("https://foo.bar/api");
        let other = base("https://other.host/api");
        let foreign = resolve(&other, "x").unwrap();
        assert!(resolve_child(&b, &foreign, "y").unwrap_err().is_invalid_path());
        assert!(resolve_relative(&b, &foreign, "../y").unwrap_err().is_invalid_path());
    }
}
