//! Navigation link state.
//!
//! # Responsibilities
//! - Resolve a link target against the enclosing router's base uri
//! - Report whether the link points at the current location
//! - Decide when a navigation link is highlighted as active

use serde::Serialize;

use crate::routing::resolve::resolve;

/// Class applied to an active navigation link.
pub const ACTIVE_CLASS: &str = "active";

/// Everything a renderer needs to draw one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkState {
    pub href: String,
    pub is_current: bool,
    pub is_partially_current: bool,
    pub aria_current: Option<&'static str>,
}

impl LinkState {
    /// Evaluate a link to `to` from a router based at `base_uri`, while the
    /// navigator sits at `pathname`.
    pub fn evaluate(to: &str, base_uri: &str, pathname: &str) -> Self {
        let href = if to == "/" {
            base_uri.to_string()
        } else {
            resolve(to, base_uri)
        };
        let is_current = href == pathname;

        Self {
            is_partially_current: pathname.starts_with(&href),
            aria_current: is_current.then_some("page"),
            is_current,
            href,
        }
    }

    /// A navigation link is active when it is current, or when it is a
    /// prefix of the current location and not the site root.
    pub fn is_active_nav(&self) -> bool {
        if self.href == "/" {
            self.is_current
        } else {
            self.is_partially_current || self.is_current
        }
    }

    /// CSS class for a navigation link, if any.
    pub fn nav_class(&self) -> Option<&'static str> {
        self.is_active_nav().then_some(ACTIVE_CLASS)
    }
}
