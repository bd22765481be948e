//! Observable value stores.
//!
//! # Data Flow
//! ```text
//! Writable::set(value)
//!     → compare with current value (no change, no notification)
//!     → listeners.rs notifies every subscriber
//!     → derived.rs recomputes dependent stores
//!     → their subscribers are notified in turn
//! ```
//!
//! # Design Decisions
//! - Each store owns its subscriber list; there is no global state
//! - `subscribe` runs the callback immediately with the current value
//! - Subscriptions are RAII guards; dropping one unsubscribes
//! - Callbacks run outside every lock, so they may read or write stores

pub mod derived;
pub mod listeners;
pub mod writable;

pub use derived::{derived, derived2};
pub use listeners::{Listeners, Subscription};
pub use writable::{Readable, Writable};
