//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use site_router::config::SiteConfig;
use site_router::history::MemoryHistory;
use site_router::routing::{RouteId, Router};
use site_router::store::Subscription;

/// The blog site's top-level router over an in-memory history at `uri`.
pub fn blog_router(uri: &str) -> (Router, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::new(uri));
    let router = Router::from_config(&SiteConfig::default(), history.clone());
    (router, history)
}

/// Look up a registered route by its configured name.
pub fn route_id(router: &Router, name: &str) -> RouteId {
    router
        .routes()
        .into_iter()
        .map(|route| route.id)
        .find(|id| router.route_name(*id).as_deref() == Some(name))
        .unwrap_or_else(|| panic!("no route named {name}"))
}

/// Record the name of every route that becomes active.
#[allow(dead_code)]
pub fn record_active(router: &Router) -> (Arc<Mutex<Vec<Option<String>>>>, Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let names: Vec<(RouteId, Option<String>)> = router
        .routes()
        .into_iter()
        .map(|route| (route.id, router.route_name(route.id)))
        .collect();

    let sink = seen.clone();
    let subscription = router.active_route_store().subscribe(move |active| {
        let name = active.as_ref().and_then(|m| {
            names
                .iter()
                .find(|(id, _)| *id == m.route.id)
                .and_then(|(_, name)| name.clone())
        });
        sink.lock().unwrap().push(name);
    });
    (seen, subscription)
}
