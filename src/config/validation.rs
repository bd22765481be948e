//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base path and fixed url are absolute
//! - Check route names are present and unique
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Route templates are never rejected; odd templates match literally
//! - Several default routes are tolerated (the last one ranked wins), so
//!   they only produce a warning

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::SiteConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("router.basepath must start with '/', got {0:?}")]
    RelativeBasepath(String),

    #[error("router.url must start with '/', got {0:?}")]
    RelativeUrl(String),

    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),

    #[error("route name {0:?} is used more than once")]
    DuplicateRouteName(String),
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.router.basepath.starts_with('/') {
        errors.push(ValidationError::RelativeBasepath(config.router.basepath.clone()));
    }

    if let Some(url) = config.router.url.as_deref() {
        if !url.is_empty() && !url.starts_with('/') {
            errors.push(ValidationError::RelativeUrl(url.to_string()));
        }
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName(index));
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
    }

    let defaults: Vec<&str> = config
        .routes
        .iter()
        .filter(|r| r.path.is_empty())
        .map(|r| r.name.as_str())
        .collect();
    if defaults.len() > 1 {
        tracing::warn!(routes = ?defaults, "several default routes configured, the last one wins");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
