//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config and environment
//! - Provide a scoped subscriber for work done before the config is known
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for machine parsing, pretty format for development
//! - `RUST_LOG` takes precedence over the configured level

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build a subscriber writing to `writer`, without installing it.
pub fn build_subscriber<W>(config: &ObservabilityConfig, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Clone + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(config.json.then(|| fmt::layer().json().with_writer(writer.clone())))
        .with((!config.json).then(|| fmt::layer().with_writer(writer)))
}

/// Install the global tracing subscriber, logging to stderr.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    build_subscriber(config, std::io::stderr).try_init()
}

/// Run `f` with a stderr subscriber using the default settings.
///
/// Used while loading the configuration, before [`init_logging`] can run.
pub fn with_default_logging<T>(f: impl FnOnce() -> T) -> T {
    tracing::subscriber::with_default(
        build_subscriber(&ObservabilityConfig::default(), std::io::stderr),
        f,
    )
}
