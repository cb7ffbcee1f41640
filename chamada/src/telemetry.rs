//! Tracing initialization (fmt subscriber + `RUST_LOG` filtering).
//!
//! The filter defaults to `info`, which logs one line per handled request plus the HTTP trace
//! spans. Use e.g. `RUST_LOG=chamada=debug,tower_http=debug` to see client errors and SQL timing.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing with console output.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}
