//! Route scoring and ranking.
//!
//! Every segment earns [`SEGMENT_POINTS`], then a bonus depending on its
//! kind, so that
//!
//! ```text
//! static > dynamic > root > splat
//! ```
//!
//! and deeper templates outrank shallower ones. Default routes score 0.
//! Registration order only breaks ties.

use std::cmp::Ordering;

use crate::routing::route::Route;
use crate::routing::segment::{is_dynamic, is_root_segment, is_splat, segmentize};

pub const SEGMENT_POINTS: i32 = 4;
pub const STATIC_POINTS: i32 = 3;
pub const DYNAMIC_POINTS: i32 = 2;
pub const SPLAT_PENALTY: i32 = 1;
pub const ROOT_POINTS: i32 = 1;

/// A route paired with its score and registration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRoute<'a> {
    pub route: &'a Route,
    pub score: i32,
    pub index: usize,
}

/// Score a route template. Depends on nothing but the template.
pub fn score_route(route: &Route) -> i32 {
    if route.is_default {
        return 0;
    }

    segmentize(&route.path).into_iter().fold(0, |score, segment| {
        let score = score + SEGMENT_POINTS;
        if is_root_segment(segment) {
            score + ROOT_POINTS
        } else if is_dynamic(segment) {
            score + DYNAMIC_POINTS
        } else if is_splat(segment) {
            score - (SEGMENT_POINTS + SPLAT_PENALTY)
        } else {
            score + STATIC_POINTS
        }
    })
}

pub fn rank_route(route: &Route, index: usize) -> RankedRoute<'_> {
    RankedRoute {
        route,
        score: score_route(route),
        index,
    }
}

fn by_rank(a: &RankedRoute<'_>, b: &RankedRoute<'_>) -> Ordering {
    b.score.cmp(&a.score).then(a.index.cmp(&b.index))
}

/// Rank routes by descending score, ties broken by ascending index.
pub fn rank_routes<'a, I>(routes: I) -> Vec<RankedRoute<'a>>
where
    I: IntoIterator<Item = &'a Route>,
{
    let mut ranked: Vec<_> = routes
        .into_iter()
        .enumerate()
        .map(|(index, route)| rank_route(route, index))
        .collect();
    ranked.sort_by(by_rank);
    ranked
}
