//! Path segmentation.
//!
//! # Responsibilities
//! - Split paths into `/`-delimited segments
//! - Classify segments (root, dynamic, splat, static)
//! - Join base paths with route templates
//!
//! # Design Decisions
//! - Every function is total: any string is a valid input
//! - The root path segments to a single empty segment (`[""]`)
//! - Segment classification does no validation; `:` alone is a static segment

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Split `pathname?query`. Only the text between the first and second `?`
/// is kept as the query.
pub fn split_query(uri: &str) -> (&str, Option<&str>) {
    let mut parts = uri.split('?');
    let pathname = parts.next().unwrap_or_default();
    (pathname, parts.next())
}

/// Strip every leading and trailing `/` from `path`.
pub fn strip_slashes(path: &str) -> &str {
    path.trim_matches('/')
}

/// Split a path into its segments.
///
/// ```
/// use site_router::routing::segment::segmentize;
///
/// assert_eq!(segmentize(""), vec![""]);
/// assert_eq!(segmentize("/a/b/"), vec!["a", "b"]);
/// ```
pub fn segmentize(path: &str) -> Vec<&str> {
    strip_slashes(path).split('/').collect()
}

/// The empty segment stands for the root path.
pub fn is_root_segment(segment: &str) -> bool {
    segment.is_empty()
}

/// Name bound by a `:name` segment, if `segment` is dynamic.
pub fn dynamic_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(':').filter(|name| !name.is_empty())
}

/// True for `:name` segments with a non-empty name.
pub fn is_dynamic(segment: &str) -> bool {
    dynamic_name(segment).is_some()
}

/// True for `*` and `*name` segments.
pub fn is_splat(segment: &str) -> bool {
    segment.starts_with('*')
}

/// Parameter name bound by a splat segment. Anonymous splats bind `*`.
pub fn splat_name(segment: &str) -> &str {
    match segment {
        "*" => "*",
        named => &named[1..],
    }
}

/// Percent-decode a single path segment.
///
/// Malformed escapes are kept verbatim and invalid UTF-8 is replaced, so
/// decoding never fails.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    percent_decode_str(segment).decode_utf8_lossy()
}

/// Join a router base path and a route template into an effective path.
///
/// The result always ends with `/` and otherwise has no leading slash. Under
/// a root base, both the root and the empty template collapse to `/`.
pub fn combine_paths(basepath: &str, path: &str) -> String {
    let joined = if path == "/" {
        Cow::Borrowed(basepath)
    } else {
        Cow::Owned(format!("{}/{}", strip_slashes(basepath), strip_slashes(path)))
    };
    format!("{}/", strip_slashes(&joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("/blog"), ("/blog", None));
        assert_eq!(split_query("/blog?page=2"), ("/blog", Some("page=2")));
        assert_eq!(split_query("/blog?"), ("/blog", Some("")));
        assert_eq!(split_query("a?x?y"), ("a", Some("x")));
    }

    #[test]
    fn test_segmentize() {
        assert_eq!(segmentize(""), vec![""]);
        assert_eq!(segmentize("/"), vec![""]);
        assert_eq!(segmentize("/a/b/"), vec!["a", "b"]);
        assert_eq!(segmentize("//a//b//"), vec!["a", "", "b"]);
        assert_eq!(segmentize("blog/*"), vec!["blog", "*"]);
    }

    #[test]
    fn test_segment_kinds() {
        assert!(is_root_segment(""));
        assert!(!is_root_segment("a"));

        assert!(is_dynamic(":id"));
        assert_eq!(dynamic_name(":id"), Some("id"));
        // A bare colon has no name and is matched literally
        assert!(!is_dynamic(":"));
        assert!(!is_dynamic("id"));

        assert!(is_splat("*"));
        assert!(is_splat("*rest"));
        assert!(!is_splat("a*"));
        assert_eq!(splat_name("*"), "*");
        assert_eq!(splat_name("*rest"), "rest");
    }

    #[test]
    fn test_decode_segment() {
        assert_eq!(decode_segment("hello%20world"), "hello world");
        assert_eq!(decode_segment("caf%C3%A9"), "café");
        assert_eq!(decode_segment("100%"), "100%");
        assert_eq!(decode_segment("plain"), "plain");
    }

    #[test]
    fn test_combine_paths() {
        assert_eq!(combine_paths("/", "/"), "/");
        assert_eq!(combine_paths("/", "about"), "about/");
        assert_eq!(combine_paths("/", "blog/*"), "blog/*/");
        assert_eq!(combine_paths("/blog", "/"), "blog/");
        assert_eq!(combine_paths("/blog/", ":slug"), "blog/:slug/");
        assert_eq!(combine_paths("/", ""), "/");
    }
}
