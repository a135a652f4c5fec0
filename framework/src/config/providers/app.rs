use crate::config::env::{env, Environment};

/// Application-wide settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shown in page titles and log lines (`APP_NAME`)
    pub name: String,
    pub environment: Environment,
    /// `APP_DEBUG`
    pub debug: bool,
    /// Public base URL (`APP_URL`)
    pub url: String,
    /// Default tracing filter when `RUST_LOG` is unset (`LOG_LEVEL`)
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = Environment::detect();
        let default_level = if environment.is_production() {
            "info"
        } else {
            "debug"
        };
        Self {
            name: env("APP_NAME", "Taskboard".to_string()),
            debug: env("APP_DEBUG", !environment.is_production()),
            url: env("APP_URL", "http://localhost:8080".to_string()),
            log_level: env("LOG_LEVEL", default_level.to_string()),
            environment,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
