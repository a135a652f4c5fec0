//! Database connection handling on top of SeaORM
//!
//! ```rust,ignore
//! let conn = DB::init().await?;
//! let rows = tasks::Entity::find().all(conn.inner()).await?;
//! ```
//!
//! Settings come from the environment:
//!
//! ```env
//! DATABASE_URL=sqlite://storage/taskboard.db
//! DB_MAX_CONNECTIONS=10
//! DB_MIN_CONNECTIONS=1
//! DB_CONNECT_TIMEOUT=30
//! DB_LOGGING=false
//! ```

pub mod config;
pub mod connection;

pub use config::{DatabaseConfig, DatabaseConfigBuilder, DatabaseType};
pub use connection::DbConnection;

use crate::error::FrameworkError;
use crate::{App, Config};

/// Database facade
///
/// The connection pool lives in the [`App`] container as a singleton.
pub struct DB;

impl DB {
    /// Connect using the registered `DatabaseConfig`, or one read from the
    /// environment
    pub async fn init() -> Result<DbConnection, FrameworkError> {
        let config = Config::get::<DatabaseConfig>().unwrap_or_else(DatabaseConfig::from_env);
        Self::init_with(config).await
    }

    /// Connect with an explicit config and register the connection
    pub async fn init_with(config: DatabaseConfig) -> Result<DbConnection, FrameworkError> {
        let connection = DbConnection::connect(&config).await?;
        tracing::info!(backend = ?config.database_type(), "database connected");
        App::singleton(connection.clone());
        Ok(connection)
    }
}

pub use sea_orm;
