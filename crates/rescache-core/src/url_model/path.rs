//! Path segment lists: splitting caller input and reading canonical paths.
//!
//! Resolution works on explicit segment stacks rather than on strings, so
//! that traversal can be checked against the base depth before any URL is
//! built.

use url::Url;

use crate::error::ResolveError;

/// A path as a list of non-empty segments plus a directory marker.
///
/// `directory` is true when the rendered path ends with `/`. The empty
/// segment list is always a directory (it renders as `/`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegments {
    pub(crate) segments: Vec<String>,
    pub(crate) directory: bool,
}

impl PathSegments {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_directory(&self) -> bool {
        self.directory || self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Reads the segments of an already parsed URL, collapsing empty ones.
    pub fn of_url(url: &Url) -> Self {
        let path = url.path();
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            segments,
            directory: path.ends_with('/'),
        }
    }

    /// Renders as an absolute path: `/`, `/a/b` or `/a/b/`.
    pub fn render(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::with_capacity(
            self.segments.iter().map(|s| s.len() + 1).sum::<usize>() + 1,
        );
        for segment in &self.segments {
            out.push('/');
            out.push_str(segment);
        }
        if self.directory {
            out.push('/');
        }
        out
    }
}

/// True for `.` and `..`, including their percent-encoded spellings, which
/// URL parsers treat the same way.
pub fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e") || is_parent_segment(segment)
}

/// True only for the parent spellings (`..`, `%2e%2e`, ...).
pub fn is_parent_segment(segment: &str) -> bool {
    let lower = segment.to_ascii_lowercase();
    matches!(lower.as_str(), ".." | ".%2e" | "%2e." | "%2e%2e")
}

/// Rejects characters that would change the meaning of a composed URL.
pub(crate) fn check_path_chars(raw: &str) -> Result<(), ResolveError> {
    if raw.contains('?') {
        return Err(ResolveError::invalid_path(
            raw,
            "query strings belong to the base URL, not to resource paths",
        ));
    }
    if raw.contains('#') {
        return Err(ResolveError::invalid_path(raw, "fragments are not allowed"));
    }
    if raw.contains('\\') {
        return Err(ResolveError::invalid_path(raw, "backslash in path"));
    }
    if raw.chars().any(char::is_control) {
        return Err(ResolveError::invalid_path(raw, "control character in path"));
    }
    Ok(())
}

/// Splits a plain subpath (no traversal) into segments.
///
/// One leading `/` is ignored, interior empty segments collapse, and a
/// trailing `/` marks a directory. Any `.` or `..` segment is rejected.
pub fn split_subpath(raw: &str) -> Result<PathSegments, ResolveError> {
    check_path_chars(raw)?;
    let body = raw.strip_prefix('/').unwrap_or(raw);

    let mut segments = Vec::new();
    for segment in body.split('/').filter(|s| !s.is_empty()) {
        if is_dot_segment(segment) {
            return Err(ResolveError::invalid_path(
                raw,
                format!("dot segment {segment:?} in resource path"),
            ));
        }
        segments.push(segment.to_string());
    }

    Ok(PathSegments {
        directory: body.is_empty() || body.ends_with('/'),
        segments,
    })
}
