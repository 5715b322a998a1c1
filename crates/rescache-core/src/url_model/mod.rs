//! URL modeling: base normalization and canonical resource URLs.
//!
//! A service's base is normalized once (trailing slash enforced, query kept)
//! and every resource URL derived from it is a [`CanonicalUrl`], the key used
//! for resource identity.

mod base;
mod canonical;
mod path;

pub use base::BaseUrl;
pub use canonical::CanonicalUrl;
pub use path::{is_dot_segment, is_parent_segment, split_subpath, PathSegments};

pub(crate) use path::check_path_chars;

use crate::error::ResolveError;

/// Normalizes a raw base string into its canonical form.
///
/// # Examples
///
/// - `normalize("http://foo.bar")` → `"http://foo.bar/"`
/// - `normalize("http://foo.bar?x=y")` → `"http://foo.bar/?x=y"`
pub fn normalize(raw: &str) -> Result<CanonicalUrl, ResolveError> {
    BaseUrl::parse(raw).map(|base| base.as_canonical().clone())
}
