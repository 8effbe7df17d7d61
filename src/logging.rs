//! Logging and tracing configuration

use crate::config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing based on configuration. `RUST_LOG` wins over `logging.level`.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().with_target(false).json())
            .try_init()?,
        "pretty" => registry.with(fmt::layer().pretty()).try_init()?,
        _ => registry.with(fmt::layer().compact()).try_init()?,
    }

    Ok(())
}
