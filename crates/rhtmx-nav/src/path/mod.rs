//! Location path helpers shared by the matcher, the router and the history adapters.
//!
//! Nothing here touches global state; every function maps a path to a path.

use std::borrow::Cow;

/// Cuts a location string at the first `?` or `#`
///
/// # Examples
///
/// ```
/// use rhtmx_nav::path::strip_query_and_fragment;
///
/// assert_eq!(strip_query_and_fragment("/workflow/42?tab=runs"), "/workflow/42");
/// assert_eq!(strip_query_and_fragment("/workflow/42#log"), "/workflow/42");
/// assert_eq!(strip_query_and_fragment("/"), "/");
/// ```
pub fn strip_query_and_fragment(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |idx| &path[..idx])
}

/// Location path in the form route patterns are compared against
///
/// Query and fragment are cut, a missing leading `/` is added and trailing
/// `/` are trimmed, with the root staying `/`. Only `/` separates segments:
/// empty interior segments and `\` are kept, so `/workflow//42` still has
/// three segments. `None` when nothing is left once the query is cut.
///
/// ```
/// use rhtmx_nav::path::route_path;
///
/// assert_eq!(route_path("/workflow/42/?tab=runs").as_deref(), Some("/workflow/42"));
/// assert_eq!(route_path("///").as_deref(), Some("/"));
/// assert_eq!(route_path("/workflow//42").as_deref(), Some("/workflow//42"));
/// assert_eq!(route_path("?tab=runs"), None);
/// ```
pub fn route_path(location: &str) -> Option<Cow<'_, str>> {
    let path = strip_query_and_fragment(location);
    if path.is_empty() {
        return None;
    }

    let trimmed = path.trim_end_matches('/');
    Some(if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else if trimmed.starts_with('/') {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("/{}", trimmed))
    })
}

/// Whether `path` is already canonical
///
/// Canonical means: non-empty, rooted at `/`, no empty segments, no
/// backslashes, and no trailing `/` unless the whole path is the root.
///
/// ```
/// use rhtmx_nav::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/workflow/42"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("workflow")); // Missing leading /
/// assert!(!is_valid_path("/workflow/")); // Trailing /
/// assert!(!is_valid_path("/workflow//42")); // Double //
/// ```
pub fn is_valid_path(path: &str) -> bool {
    let rooted = path.starts_with('/');
    let clean = !path.contains("//") && !path.contains('\\');
    rooted && clean && (path == "/" || !path.ends_with('/'))
}

/// Canonical form of `path`
///
/// Borrows when the input is canonical already. Otherwise backslashes become
/// `/`, empty segments are dropped and the result is re-rooted, so
/// `\workflow\42\` and `workflow//42/` both give `/workflow/42`.
///
/// ```
/// use rhtmx_nav::path::normalize_path;
/// use std::borrow::Cow;
///
/// let path = normalize_path("/workflow/42");
/// assert!(matches!(path, Cow::Borrowed("/workflow/42")));
///
/// assert_eq!(normalize_path("/workflow/42/"), "/workflow/42");
/// assert_eq!(normalize_path("//"), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let mut canonical = String::with_capacity(path.len() + 1);
    for segment in path.split(['/', '\\']).filter(|segment| !segment.is_empty()) {
        canonical.push('/');
        canonical.push_str(segment);
    }

    if canonical.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(canonical)
    }
}

/// Splits a rooted path on `/`
///
/// The root path is a single empty segment, so `/` never has the same shape
/// as a one-literal path like `/about`. Only the one leading `/` is dropped;
/// every other empty segment is kept.
///
/// ```
/// use rhtmx_nav::path::split_segments;
///
/// assert_eq!(split_segments("/"), vec![""]);
/// assert_eq!(split_segments("/workflow/42"), vec!["workflow", "42"]);
/// assert_eq!(split_segments("/workflow//42"), vec!["workflow", "", "42"]);
/// ```
pub fn split_segments(path: &str) -> Vec<&str> {
    if path == "/" {
        return vec![""];
    }
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

/// Percent-decodes a single path segment
///
/// Falls back to the raw segment when the decoded bytes are not valid UTF-8.
pub fn decode_segment(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Prefixes an app-relative path with the base the app is served under
///
/// ```
/// use rhtmx_nav::path::join_base;
///
/// assert_eq!(join_base("/", "/workflow/42"), "/workflow/42");
/// assert_eq!(join_base("/console", "/workflow/42"), "/console/workflow/42");
/// assert_eq!(join_base("/console/", "/"), "/console");
/// ```
pub fn join_base(base: &str, path: &str) -> String {
    let base = normalize_path(base);
    if base == "/" {
        return path.to_string();
    }
    if path.is_empty() || path == "/" {
        return base.into_owned();
    }
    if path.starts_with(['?', '#']) {
        return format!("{}{}", base, path);
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}

/// Removes the base prefix from a browser location path
///
/// Paths outside the base are returned unchanged.
///
/// ```
/// use rhtmx_nav::path::strip_base;
///
/// assert_eq!(strip_base("/console", "/console/workflow/42"), "/workflow/42");
/// assert_eq!(strip_base("/console", "/console"), "/");
/// assert_eq!(strip_base("/console", "/consoles"), "/consoles");
/// assert_eq!(strip_base("/", "/workflow/42"), "/workflow/42");
/// ```
pub fn strip_base<'a>(base: &str, path: &'a str) -> &'a str {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}
