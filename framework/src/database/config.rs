use crate::config::env::env;

/// Database backend, derived from the URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Sqlite,
    Postgres,
}

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `DATABASE_URL`
    pub url: String,
    /// `DB_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `DB_MIN_CONNECTIONS`
    pub min_connections: u32,
    /// Seconds (`DB_CONNECT_TIMEOUT`)
    pub connect_timeout: u64,
    /// Log every statement (`DB_LOGGING`)
    pub logging: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env("DATABASE_URL", "sqlite://storage/taskboard.db".to_string()),
            max_connections: env("DB_MAX_CONNECTIONS", 10),
            min_connections: env("DB_MIN_CONNECTIONS", 1),
            connect_timeout: env("DB_CONNECT_TIMEOUT", 30),
            logging: env("DB_LOGGING", false),
        }
    }

    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }

    pub fn database_type(&self) -> DatabaseType {
        if self.url.starts_with("postgres://") || self.url.starts_with("postgresql://") {
            DatabaseType::Postgres
        } else {
            DatabaseType::Sqlite
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Builds a [`DatabaseConfig`] without touching the environment
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl Default for DatabaseConfigBuilder {
    fn default() -> Self {
        Self {
            config: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 10,
                min_connections: 1,
                connect_timeout: 30,
                logging: false,
            },
        }
    }
}

impl DatabaseConfigBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn max_connections(mut self, n: u32) -> Self {
        self.config.max_connections = n;
        self
    }

    pub fn min_connections(mut self, n: u32) -> Self {
        self.config.min_connections = n;
        self
    }

    pub fn connect_timeout(mut self, seconds: u64) -> Self {
        self.config.connect_timeout = seconds;
        self
    }

    pub fn logging(mut self, enabled: bool) -> Self {
        self.config.logging = enabled;
        self
    }

    pub fn build(self) -> DatabaseConfig {
        self.config
    }
}
