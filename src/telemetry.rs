//! Tracing setup
//!
//! Console output filtered by `RUST_LOG` (default: info).

use tracing_subscriber::EnvFilter;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Use `debug` when `RUST_LOG` is not set
    pub debug: bool,
}

pub fn init_tracing(config: &TracingConfig) -> AppResult<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| AppError::Telemetry(err.to_string()))
}
