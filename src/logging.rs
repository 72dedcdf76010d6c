//! Tracing subscriber setup for embedders that want engine logs.

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{GraphError, Result};

/// Initializes a global `tracing` subscriber with the given filter.
///
/// `level` accepts any `tracing_subscriber` env-filter directive, e.g.
/// `"info"` or `"trellis=debug"`. Calling this twice, or after the host
/// process installed its own subscriber, returns `InvalidArgument`.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| GraphError::InvalidArgument(format!("invalid log filter: {e}")))?,
        )
        .with_target(true)
        .try_init()
        .map_err(|_| GraphError::InvalidArgument("logging already initialized".into()))
}
