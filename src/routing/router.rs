//! Route registration and active route tracking.
//!
//! # Responsibilities
//! - Register and unregister routes under the router's base path
//! - Track the current location and the active route match
//! - Rebase every route when the base path changes
//! - Provide the base for nested routers and links
//!
//! # Design Decisions
//! - Client mode re-ranks the whole table on every change; nothing is cached
//! - Server mode matches each route once, at registration, and the first
//!   match sticks. Later registrations are recorded but never picked
//! - Only the top router listens to history; nested routers share its
//!   location store
//! - Explicit `None` when nothing matches, including no default route

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::config::schema::{RouterConfig, SiteConfig};
use crate::history::{History, HistoryError, HistoryEvent, Location, NavigateOptions};
use crate::routing::link::LinkState;
use crate::routing::matcher::{match_route, pick, Params, RouteMatch};
use crate::routing::route::{Route, RouteId, RouteTable};
use crate::store::{derived2, Readable, Subscription, Writable};

/// How the active route is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterMode {
    /// Rank every registered route on each change.
    #[default]
    Client,
    /// First route to match at registration wins.
    Server,
}

/// Base path and resolved uri that routes and links are relative to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterBase {
    pub path: String,
    pub uri: String,
}

impl RouterBase {
    pub fn new(basepath: &str) -> Self {
        Self {
            path: basepath.to_string(),
            uri: basepath.to_string(),
        }
    }
}

/// Cut a template at its splat, `blog/*/` becoming `blog/`.
fn strip_splat(path: &str) -> &str {
    path.find('*').map_or(path, |index| &path[..index])
}

/// The base handed to routers nested below `active`.
pub fn nested_base(base: &RouterBase, active: &Option<RouteMatch>) -> RouterBase {
    match active {
        None => base.clone(),
        Some(found) => RouterBase {
            path: if found.route.is_default {
                base.path.clone()
            } else {
                strip_splat(&found.route.path).to_string()
            },
            uri: found.uri.clone(),
        },
    }
}

struct RouterState {
    mode: RouterMode,
    table: Mutex<RouteTable>,
    base: Writable<RouterBase>,
    location: Writable<Location>,
    active_route: Writable<Option<RouteMatch>>,
    has_active_route: AtomicBool,
}

impl RouterState {
    fn refresh(&self) {
        if self.mode == RouterMode::Server {
            return;
        }

        let routes = self.table.lock().expect("route table mutex poisoned").to_vec();
        let pathname = self.location.get().pathname;
        let best = pick(&routes, &pathname);

        tracing::debug!(
            pathname = %pathname,
            candidates = routes.len(),
            route = ?best.as_ref().map(|m| m.route.id),
            "active route picked"
        );
        self.active_route.set(best);
    }

    fn rebase(&self, basepath: &str) {
        self.table.lock().expect("route table mutex poisoned").rebase(basepath);
    }
}

/// Owns a route table and decides which route is active.
pub struct Router {
    state: Arc<RouterState>,
    router_base: Readable<RouterBase>,
    history: Arc<dyn History>,
    _subscriptions: Vec<Subscription>,
}

impl Router {
    /// Create a top-level router.
    ///
    /// The location comes from `config.url` when set, otherwise from
    /// `history`. Client-mode routers follow history changes.
    pub fn new(config: &RouterConfig, history: Arc<dyn History>) -> Self {
        let location = match config.url.as_deref() {
            Some(url) if !url.is_empty() => Location::from_uri(url),
            _ => history.location(),
        };

        Self::build(
            config.mode,
            Writable::new(RouterBase::new(&config.basepath)),
            Writable::new(location),
            history,
            true,
            Vec::new(),
        )
    }

    /// Create a router and register every configured route in order.
    pub fn from_config(config: &SiteConfig, history: Arc<dyn History>) -> Self {
        let router = Self::new(&config.router, history);
        for route in &config.routes {
            router.register_named(&route.name, &route.path);
        }
        tracing::info!(
            routes = router.routes().len(),
            basepath = %config.router.basepath,
            mode = ?config.router.mode,
            "router configured"
        );
        router
    }

    fn build(
        mode: RouterMode,
        base: Writable<RouterBase>,
        location: Writable<Location>,
        history: Arc<dyn History>,
        listen: bool,
        mut subscriptions: Vec<Subscription>,
    ) -> Self {
        let state = Arc::new(RouterState {
            mode,
            table: Mutex::new(RouteTable::new()),
            base,
            location,
            active_route: Writable::new(None),
            has_active_route: AtomicBool::new(false),
        });
        let router_base = derived2(
            &state.base.readable(),
            &state.active_route.readable(),
            nested_base,
        );

        let weak = Arc::downgrade(&state);
        subscriptions.push(state.base.subscribe(move |base: &RouterBase| {
            if let Some(state) = weak.upgrade() {
                state.rebase(&base.path);
                state.refresh();
            }
        }));

        let weak = Arc::downgrade(&state);
        subscriptions.push(state.location.subscribe(move |_: &Location| {
            if let Some(state) = weak.upgrade() {
                state.refresh();
            }
        }));

        if listen && mode == RouterMode::Client {
            let location = state.location.clone();
            subscriptions.push(history.listen(Box::new(move |event: &HistoryEvent| {
                location.set(event.location.clone());
            })));
        }

        Self {
            state,
            router_base,
            history,
            _subscriptions: subscriptions,
        }
    }

    /// Create a router nested below this one.
    ///
    /// Its base follows this router's active route and it shares this
    /// router's location.
    pub fn child(&self) -> Router {
        let base = Writable::new(self.router_base.get());
        let follow = {
            let base = base.clone();
            self.router_base.subscribe(move |parent: &RouterBase| base.set(parent.clone()))
        };

        Self::build(
            self.state.mode,
            base,
            self.state.location.clone(),
            self.history.clone(),
            false,
            vec![follow],
        )
    }

    /// Register a route template. An empty template registers the default
    /// route.
    pub fn register(&self, path: &str) -> RouteId {
        self.insert(None, path)
    }

    /// Register a route template under a display name.
    pub fn register_named(&self, name: &str, path: &str) -> RouteId {
        self.insert(Some(name), path)
    }

    fn insert(&self, name: Option<&str>, path: &str) -> RouteId {
        let basepath = self.state.base.get().path;
        let (id, route) = {
            let mut table = self.state.table.lock().expect("route table mutex poisoned");
            let id = table.insert_named(&basepath, path, name);
            (id, table.get(id).map(|entry| entry.route().clone()))
        };

        tracing::debug!(
            route = %id,
            name = name.unwrap_or_default(),
            path,
            effective = route.as_ref().map(|r| r.path.as_str()).unwrap_or_default(),
            "route registered"
        );

        match self.state.mode {
            RouterMode::Client => self.state.refresh(),
            RouterMode::Server => {
                if self.state.has_active_route.load(Ordering::Acquire) {
                    return id;
                }
                let pathname = self.state.location.get().pathname;
                if let Some(found) = route.and_then(|r| match_route(&r, &pathname)) {
                    tracing::debug!(route = %id, pathname = %pathname, "active route matched on registration");
                    self.state.active_route.set(Some(found));
                    self.state.has_active_route.store(true, Ordering::Release);
                }
            }
        }
        id
    }

    /// Remove a route. Returns false for an unknown id.
    pub fn unregister(&self, id: RouteId) -> bool {
        let removed = self
            .state
            .table
            .lock()
            .expect("route table mutex poisoned")
            .remove(id)
            .is_some();

        if removed {
            tracing::debug!(route = %id, "route unregistered");
            self.state.refresh();
        }
        removed
    }

    /// Change the base path and rebase every registered route.
    ///
    /// Nested routers take their base from the parent, which overrides
    /// this on the parent's next change.
    pub fn set_basepath(&self, basepath: &str) {
        self.state.base.set(RouterBase::new(basepath));
    }

    /// Navigate through the injected history.
    pub fn navigate(&self, to: &str, options: NavigateOptions) -> Result<(), HistoryError> {
        self.history.navigate(to, options)
    }

    /// Re-pick the active route for the current location.
    pub fn refresh(&self) {
        self.state.refresh();
    }

    pub fn mode(&self) -> RouterMode {
        self.state.mode
    }

    pub fn active_route(&self) -> Option<RouteMatch> {
        self.state.active_route.get()
    }

    /// Observe active route changes.
    pub fn active_route_store(&self) -> Readable<Option<RouteMatch>> {
        self.state.active_route.readable()
    }

    pub fn is_active(&self, id: RouteId) -> bool {
        self.active_route().is_some_and(|m| m.route.id == id)
    }

    /// Params bound for `id`, if it is the active route.
    pub fn route_params(&self, id: RouteId) -> Option<Params> {
        self.active_route()
            .filter(|m| m.route.id == id)
            .map(|m| m.params)
    }

    pub fn location(&self) -> Location {
        self.state.location.get()
    }

    pub fn base(&self) -> RouterBase {
        self.state.base.get()
    }

    /// The base nested routers see.
    pub fn router_base(&self) -> RouterBase {
        self.router_base.get()
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> Vec<Route> {
        self.state.table.lock().expect("route table mutex poisoned").to_vec()
    }

    pub fn route_name(&self, id: RouteId) -> Option<String> {
        self.state
            .table
            .lock()
            .expect("route table mutex poisoned")
            .get(id)
            .and_then(|entry| entry.name().map(str::to_string))
    }

    /// State of a link to `to` placed inside this router.
    pub fn link(&self, to: &str) -> LinkState {
        LinkState::evaluate(to, &self.base().uri, &self.location().pathname)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("mode", &self.state.mode)
            .field("base", &self.state.base)
            .field("routes", &self.routes().len())
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{MemoryHistory, StaticHistory};

    fn client(uri: &str) -> (Router, Arc<MemoryHistory>) {
        let history = Arc::new(MemoryHistory::new(uri));
        (Router::new(&RouterConfig::default(), history.clone()), history)
    }

    fn server(uri: &str) -> Router {
        let config = RouterConfig {
            mode: RouterMode::Server,
            ..RouterConfig::default()
        };
        Router::new(&config, Arc::new(StaticHistory::new(uri)))
    }

    #[test]
    fn test_registration_picks_active_route() {
        let (router, _) = client("/about");
        let about = router.register("about");
        let blog = router.register("blog/*");
        let home = router.register("/");

        assert!(router.is_active(about));
        assert!(!router.is_active(blog));
        assert!(!router.is_active(home));
        assert_eq!(router.routes()[0].path, "about/");
    }

    #[test]
    fn test_follows_history() {
        let (router, history) = client("/");
        let blog = router.register("blog/*");
        let home = router.register("/");
        assert!(router.is_active(home));

        history.navigate("/blog/first-post", NavigateOptions::default()).unwrap();
        assert!(router.is_active(blog));
        assert_eq!(router.route_params(blog).unwrap()["*"], "first-post");
        assert_eq!(router.route_params(home), None);

        history.back();
        assert!(router.is_active(home));
    }

    #[test]
    fn test_router_navigate() {
        let (router, history) = client("/");
        let about = router.register("about");
        router.navigate("/about", NavigateOptions::default()).unwrap();
        assert!(router.is_active(about));
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_router_base_strips_splat() {
        let (router, _) = client("/blog/first-post");
        router.register("blog/*");
        assert_eq!(
            router.router_base(),
            RouterBase {
                path: "blog/".into(),
                uri: "/blog".into()
            }
        );
    }

    #[test]
    fn test_router_base_for_default_route() {
        let (router, _) = client("/missing");
        router.register("");
        let base = router.router_base();
        assert_eq!(base.path, "/");
        assert_eq!(base.uri, "/missing");
    }

    #[test]
    fn test_unregister_falls_back_to_default() {
        let (router, _) = client("/about");
        let about = router.register("about");
        let fallback = router.register("");
        assert!(router.is_active(about));

        assert!(router.unregister(about));
        assert!(!router.unregister(about));
        assert!(router.is_active(fallback));
    }

    #[test]
    fn test_set_basepath_rebases_routes() {
        let (router, history) = client("/site/about");
        let about = router.register("about");
        assert!(router.active_route().is_none());

        router.set_basepath("/site");
        assert_eq!(router.routes()[0].path, "site/about/");
        assert!(router.is_active(about));

        history.navigate("/about", NavigateOptions::default()).unwrap();
        assert!(router.active_route().is_none());
    }

    #[test]
    fn test_url_overrides_history_location() {
        let config = RouterConfig {
            url: Some("/about".into()),
            ..RouterConfig::default()
        };
        let router = Router::new(&config, Arc::new(MemoryHistory::new("/")));
        let about = router.register("about");
        assert!(router.is_active(about));
    }

    #[test]
    fn test_server_mode_first_match_sticks() {
        let router = server("/blog/hello");
        let splat = router.register("blog/*");
        let post = router.register("blog/:slug");

        // Client mode would rank :slug higher
        assert!(router.is_active(splat));
        assert!(!router.is_active(post));
        assert_eq!(router.routes().len(), 2);

        router.refresh();
        assert!(router.is_active(splat));
    }

    #[test]
    fn test_server_mode_navigation_rejected() {
        let router = server("/");
        let err = router.navigate("/about", NavigateOptions::default()).unwrap_err();
        assert!(matches!(err, HistoryError::ReadOnly(_)));
    }

    #[test]
    fn test_child_router_follows_parent() {
        let (router, history) = client("/blog/hello");
        router.register("blog/*");
        router.register("/");

        let posts = router.child();
        assert_eq!(posts.base().path, "blog/");
        let hello = posts.register("hello");
        let other = posts.register(":slug");
        assert!(posts.is_active(hello));

        history.navigate("/blog/second", NavigateOptions::default()).unwrap();
        assert!(posts.is_active(other));
        assert_eq!(posts.route_params(other).unwrap()["slug"], "second");

        history.navigate("/", NavigateOptions::default()).unwrap();
        assert!(posts.active_route().is_none());
    }

    #[test]
    fn test_links_resolve_against_base() {
        let (router, _) = client("/blog/hello");
        router.register("blog/*");
        let posts = router.child();

        assert_eq!(router.link("about").href, "/about");
        assert!(router.link("blog").is_active_nav());
        assert_eq!(posts.link("hello").href, "/blog/hello");
        assert!(posts.link("hello").is_current);
    }
}
