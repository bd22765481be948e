//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site
//! router. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::router::RouterMode;

/// Root configuration for the site.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Top-level router settings.
    pub router: RouterConfig,

    /// Route definitions, in registration order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for SiteConfig {
    /// The blog site's page table: about, blog and home.
    fn default() -> Self {
        Self {
            router: RouterConfig::default(),
            routes: vec![
                RouteConfig::new("about", "about"),
                RouteConfig::new("blog", "blog/*"),
                RouteConfig::new("home", "/"),
            ],
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base path every route template is joined to.
    pub basepath: String,

    /// Fixed location to route, e.g. the request path when rendering on the
    /// server. Unset or empty means follow the history.
    pub url: Option<String>,

    /// Active route selection mode.
    pub mode: RouterMode,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            basepath: "/".to_string(),
            url: None,
            mode: RouterMode::Client,
        }
    }
}

/// A single route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging and output.
    pub name: String,

    /// Path template. Empty registers the default route.
    #[serde(default)]
    pub path: String,
}

impl RouteConfig {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.router.basepath, "/");
        assert_eq!(config.router.mode, RouterMode::Client);
        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_full_config() {
        let config: SiteConfig = toml::from_str(
            r#"
[router]
basepath = "/site"
url = "/site/blog/hello"
mode = "server"

[[routes]]
name = "post"
path = "blog/:slug"

[[routes]]
name = "not-found"

[observability]
log_level = "debug"
json = true
"#,
        )
        .unwrap();

        assert_eq!(config.router.basepath, "/site");
        assert_eq!(config.router.url.as_deref(), Some("/site/blog/hello"));
        assert_eq!(config.router.mode, RouterMode::Server);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].path, "");
        assert!(config.observability.json);
    }
}
