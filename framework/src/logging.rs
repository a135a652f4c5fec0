//! Tracing subscriber setup

use crate::config::AppConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` wins over `LOG_LEVEL`. Calling this twice is harmless; the
/// second subscriber is discarded.
pub fn init(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();

    if installed.is_ok() {
        tracing::debug!(app = %config.name, env = %config.environment, "logging initialized");
    }
}

/// `LOG_LEVEL` for the application, with the SQL driver kept at `warn`
fn default_directives(config: &AppConfig) -> String {
    format!("{},sqlx=warn,sea_orm_migration=info", config.log_level)
}
