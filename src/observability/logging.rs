//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level is applied to
/// this crate's events. Safe to call more than once: later calls are no-ops
/// when a subscriber is already installed (library consumers may have their
/// own).
pub fn init_logging(config: &ObservabilityConfig) {
    let fallback = format!("chain_monitor={}", config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            service = %config.service,
            log_level = %config.log_level,
            "Logging initialized"
        );
    }
}
