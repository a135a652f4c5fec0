use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::database::config::DatabaseConfig;
use crate::error::FrameworkError;

/// Cloneable handle to the SeaORM connection pool
#[derive(Clone)]
pub struct DbConnection {
    inner: Arc<DatabaseConnection>,
}

impl DbConnection {
    /// Open a pool for `config`
    ///
    /// For file-backed SQLite the parent directory is created and the file is
    /// opened in create mode.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, FrameworkError> {
        let url = sqlite_file_url(&config.url)?.unwrap_or_else(|| config.url.clone());

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.logging);

        let conn = Database::connect(opt).await?;

        Ok(Self {
            inner: Arc::new(conn),
        })
    }

    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }
}

/// Rewrite `sqlite://path` into the form sqlx opens with `mode=rwc`
fn sqlite_file_url(url: &str) -> Result<Option<String>, FrameworkError> {
    let Some(path) = url.strip_prefix("sqlite://") else {
        return Ok(None);
    };
    let path = path.trim_start_matches("./");
    if path.starts_with(":memory:") {
        return Ok(None);
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FrameworkError::database(format!(
                    "Cannot create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(Some(format!("sqlite:{}?mode=rwc", path)))
}

impl AsRef<DatabaseConnection> for DbConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl std::ops::Deref for DbConnection {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
