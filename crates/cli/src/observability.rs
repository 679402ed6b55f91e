//! `tracing-subscriber` wiring.
//!
//! All spans and events emitted by every crate in the workspace flow through
//! the subscriber installed here. Logs go to stderr so that generated source
//! and compiler output on stdout stay machine-readable.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Installs the global subscriber. `RUST_LOG` overrides the configured filter.
pub(crate) fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.with_target(false).try_init(),
    };
    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Picks the filter directive: a non-empty `rust_log` wins over the
/// configured one. Either is rejected when it does not parse.
fn build_filter(rust_log: Option<&str>, config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directive) => EnvFilter::try_new(directive).map_err(|e| {
            anyhow!(
                "Configuration error: invalid {} '{directive}': {e}",
                EnvFilter::DEFAULT_ENV
            )
        }),
        None => EnvFilter::try_new(&config.filter).map_err(|e| {
            anyhow!(
                "Configuration error: invalid log filter '{}': {e}",
                config.filter
            )
        }),
    }
}
