//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (route registration, active route changes,
//!       history navigation, config loading)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Library code only emits events; binaries install the subscriber
//! - Logs go to stderr so command output stays parseable

pub mod logging;
