//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path ("/blog/first-post?ref=home")
//!     → segment.rs (strip query, split into segments)
//!     → rank.rs (score every registered template, sort)
//!     → matcher.rs (align segments, bind params)
//!     → Return: RouteMatch { route, params, uri } or None
//!
//! Route registration:
//!     template + router base path
//!     → route.rs (keyed table, stable RouteId)
//!     → router.rs (re-pick active route, derive base for nested routers)
//!
//! Links:
//!     target + router base uri
//!     → resolve.rs (directory-style relative resolution)
//!     → link.rs (href, current / partially current)
//! ```
//!
//! # Design Decisions
//! - Registration order does not matter; specificity decides
//! - Deterministic: same routes and path always pick the same route
//! - First match wins (ordered by rank), default route last
//! - Matching and resolution are pure and never fail

pub mod link;
pub mod matcher;
pub mod rank;
pub mod resolve;
pub mod route;
pub mod router;
pub mod segment;

pub use link::LinkState;
pub use matcher::{match_route, pick, Params, RouteMatch};
pub use rank::{rank_routes, RankedRoute};
pub use resolve::resolve;
pub use route::{Route, RouteId, RouteTable};
pub use router::{Router, RouterBase, RouterMode};
pub use segment::segmentize;
