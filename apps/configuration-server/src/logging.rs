use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` wins over the configured level unless `prefer_config` is set
/// (the level came from `-v` on the command line).
///
/// # Errors
/// Returns an error if the filter does not parse or a subscriber is
/// already installed.
pub fn init(cfg: &LoggingConfig, prefer_config: bool) -> Result<()> {
    let filter = if prefer_config {
        EnvFilter::try_new(&cfg.level)
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cfg.level))
    }
    .with_context(|| format!("Invalid log filter '{}'", cfg.level))?;

    let registry = tracing_subscriber::registry().with(filter);
    match cfg.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
    .context("Failed to install tracing subscriber")
}
