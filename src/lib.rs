//! Site router library: route ranking, path matching, link resolution and
//! the router state that drives page selection for the blog site.

pub mod config;
pub mod history;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::SiteConfig;
pub use history::{History, MemoryHistory, StaticHistory};
pub use routing::{pick, resolve, Route, RouteMatch, Router};
