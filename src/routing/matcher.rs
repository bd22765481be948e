//! Route matching logic.
//!
//! # Responsibilities
//! - Align a route template against a request path, segment by segment
//! - Bind `:name` and splat parameters
//! - Pick the best-ranked matching route, falling back to the default route
//!
//! # Design Decisions
//! - Query strings are ignored for matching
//! - First match in rank order wins; default routes never short-circuit
//! - With several default routes, the last one ranked is kept
//! - A root request (`/`) never binds dynamic segments
//! - No match is `None`, never an error

use std::collections::BTreeMap;

use serde::Serialize;

use crate::routing::rank::rank_routes;
use crate::routing::route::Route;
use crate::routing::segment::{decode_segment, dynamic_name, is_splat, segmentize, splat_name};

/// Parameters bound by a match, keyed by segment name.
pub type Params = BTreeMap<String, String>;

/// The outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub route: Route,
    pub params: Params,
    /// The prefix of the request path consumed by the route.
    pub uri: String,
}

/// Strip a `?query` suffix.
pub fn pathname(uri: &str) -> &str {
    uri.split('?').next().unwrap_or_default()
}

/// Align `route` against pre-segmented request segments.
///
/// Returns the bound params and the number of request segments consumed.
fn align(route: &Route, uri_segments: &[&str], is_root_uri: bool) -> Option<(Params, usize)> {
    let route_segments = segmentize(&route.path);
    let mut params = Params::new();
    let max = route_segments.len().max(uri_segments.len());

    let mut index = 0;
    while index < max {
        let route_segment = route_segments.get(index).copied();

        if let Some(segment) = route_segment.filter(|s| is_splat(s)) {
            // uri:   /files/documents/work
            // route: /files/* or /files/*name
            let rest: Vec<_> = uri_segments
                .get(index..)
                .unwrap_or_default()
                .iter()
                .map(|s| decode_segment(s))
                .collect();
            params.insert(splat_name(segment).to_string(), rest.join("/"));
            break;
        }

        // uri:   /users
        // route: /users/:id
        let uri_segment = uri_segments.get(index).copied()?;
        // uri:   /blog/post
        // route: /blog
        let route_segment = route_segment?;

        match dynamic_name(route_segment) {
            Some(name) if !is_root_uri => {
                params.insert(name.to_string(), decode_segment(uri_segment).into_owned());
            }
            // uri:   /users/123/settings
            // route: /users/:id/profile
            _ if route_segment != uri_segment => return None,
            _ => {}
        }
        index += 1;
    }

    Some((params, index))
}

/// Rank `routes` and pick the best match for `uri`.
///
/// ```
/// use site_router::routing::matcher::pick;
/// use site_router::routing::route::{Route, RouteId};
///
/// let routes = vec![Route::new(RouteId(0), "/users/:id")];
/// let found = pick(&routes, "/users/42").unwrap();
/// assert_eq!(found.params["id"], "42");
/// assert_eq!(found.uri, "/users/42");
/// ```
pub fn pick<'a, I>(routes: I, uri: &str) -> Option<RouteMatch>
where
    I: IntoIterator<Item = &'a Route>,
{
    let uri_segments = segmentize(pathname(uri));
    let is_root_uri = uri_segments.first().is_some_and(|s| s.is_empty());
    let mut fallback = None;

    for ranked in rank_routes(routes) {
        let route = ranked.route;

        if route.is_default {
            fallback = Some(RouteMatch {
                route: route.clone(),
                params: Params::new(),
                uri: uri.to_string(),
            });
            continue;
        }

        if let Some((params, consumed)) = align(route, &uri_segments, is_root_uri) {
            return Some(RouteMatch {
                route: route.clone(),
                params,
                uri: format!("/{}", uri_segments[..consumed].join("/")),
            });
        }
    }

    fallback
}

/// Match a single route against `uri`.
pub fn match_route(route: &Route, uri: &str) -> Option<RouteMatch> {
    pick(std::iter::once(route), uri)
}
