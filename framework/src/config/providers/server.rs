use crate::config::env::env;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SERVER_HOST`
    pub host: String,
    /// `SERVER_PORT`
    pub port: u16,
    /// Largest accepted request body in bytes (`SERVER_MAX_BODY_SIZE`, 1MB)
    pub max_body_size: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env("SERVER_HOST", "127.0.0.1".to_string()),
            port: env("SERVER_PORT", 8080),
            max_body_size: env("SERVER_MAX_BODY_SIZE", 1024 * 1024),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
