//! Relative link resolution.
//!
//! Every path is treated as a directory, the way `cd` treats it, so a link
//! only needs to know where it wants to go relative to its router:
//!
//! ```text
//! profile   , /users/789 => /users/789/profile
//! ?a=b      , /users?b=c => /users?a=b
//! ./        , /users/123 => /users/123
//! ../       , /users/123 => /users
//! ../..     , /users/123 => /
//! ../../one , /a/b/c/d   => /a/b/one
//! .././one  , /a/b/c/d   => /a/b/c/one
//! ```

use crate::routing::segment::{segmentize, split_query};

/// Append `?query` to `pathname` when a non-empty query is given.
pub fn add_query(pathname: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{pathname}?{query}"),
        _ => pathname.to_string(),
    }
}

/// Resolve `to` against `base`, returning an absolute path.
pub fn resolve(to: &str, base: &str) -> String {
    // /foo/bar, /baz/qux => /foo/bar
    if to.starts_with('/') {
        return to.to_string();
    }

    let (to_pathname, to_query) = split_query(to);
    let (base_pathname, _) = split_query(base);

    let to_segments = segmentize(to_pathname);
    let base_segments = segmentize(base_pathname);

    if to_segments[0].is_empty() {
        return add_query(base_pathname, to_query);
    }

    if !to_segments[0].starts_with('.') {
        let pathname = base_segments
            .iter()
            .chain(to_segments.iter())
            .copied()
            .collect::<Vec<_>>()
            .join("/");
        let lead = if base_pathname == "/" { "" } else { "/" };
        return add_query(&format!("{lead}{pathname}"), to_query);
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in base_segments.into_iter().chain(to_segments) {
        match segment {
            ".." => {
                segments.pop();
            }
            "." => {}
            other => segments.push(other),
        }
    }

    add_query(&format!("/{}", segments.join("/")), to_query)
}
