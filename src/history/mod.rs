//! Navigation history subsystem.
//!
//! # Data Flow
//! ```text
//! Router / link click
//!     → History::navigate(to, options)
//!     → memory.rs (push/replace an entry)  or  fixed.rs (read-only, rejects)
//!     → listeners receive HistoryEvent { location, action }
//!     → router updates its location store and re-picks the active route
//! ```
//!
//! # Design Decisions
//! - History is injected into whatever owns routing state; no process-wide instance
//! - One capability trait, several sources (in-memory stack, fixed server location)
//! - `listen` returns a Subscription guard instead of an unlisten callback

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::store::Subscription;

pub mod fixed;
pub mod location;
pub mod memory;

pub use fixed::StaticHistory;
pub use location::Location;
pub use memory::MemoryHistory;

/// What caused a location change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Push,
    Replace,
    Pop,
}

/// Delivered to history listeners after every location change.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEvent {
    pub location: Location,
    pub action: Action,
}

/// Options for [`History::navigate`].
#[derive(Debug, Clone, Default)]
pub struct NavigateOptions {
    /// State stored with the new entry. A fresh `key` is always added.
    pub state: Option<Value>,
    /// Overwrite the current entry instead of pushing a new one.
    pub replace: bool,
}

/// Errors that can occur while navigating.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// The history source cannot change location.
    #[error("history is read-only, cannot navigate to {0}")]
    ReadOnly(String),
}

/// A source of locations that can be observed and navigated.
pub trait History: Send + Sync + std::fmt::Debug {
    /// The current location.
    fn location(&self) -> Location;

    /// Observe location changes until the subscription is dropped.
    fn listen(&self, listener: Box<dyn Fn(&HistoryEvent) + Send + Sync>) -> Subscription;

    /// Move to `to`, an absolute `pathname?search` uri.
    fn navigate(&self, to: &str, options: NavigateOptions) -> Result<(), HistoryError>;
}
