use crate::config::env::env;
use std::time::Duration;

/// Session cookie settings used by the flash middleware
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// `SESSION_COOKIE`
    pub cookie_name: String,
    /// Mark the cookie `Secure` (`SESSION_SECURE`)
    pub secure: bool,
    /// How long unread flash data is kept, in seconds (`SESSION_FLASH_TTL`)
    pub flash_ttl: Duration,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            cookie_name: env("SESSION_COOKIE", "taskboard_session".to_string()),
            secure: env("SESSION_SECURE", false),
            flash_ttl: Duration::from_secs(env("SESSION_FLASH_TTL", 300)),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
