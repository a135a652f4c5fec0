//! Application runner
//!
//! ```rust,ignore
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     Application::new()
//!         .config(config::register_all)
//!         .bootstrap(bootstrap::register)
//!         .routes(routes::register)
//!         .migrations::<migrations::Migrator>()
//!         .run()
//!         .await
//! }
//! ```

use crate::config::AppConfig;
use crate::database::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;
use crate::{logging, Config, Router, Server};
use clap::{Parser, Subcommand};
use sea_orm_migration::prelude::*;
use std::future::Future;
use std::marker::PhantomData;
use std::path::Path;
use std::pin::Pin;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type BootstrapFn =
    Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = Result<(), FrameworkError>> + Send>> + Send>;
type RoutesFn = Box<dyn FnOnce() -> Router + Send>;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Taskboard server and database utilities")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (default)
    Serve {
        /// Skip running migrations on startup
        #[arg(long)]
        no_migrate: bool,
    },
    /// Run pending database migrations
    Migrate,
    /// Show migration status
    #[command(name = "migrate:status")]
    MigrateStatus,
    /// Roll back the last migration(s)
    #[command(name = "migrate:rollback")]
    MigrateRollback {
        #[arg(default_value = "1")]
        steps: u32,
    },
    /// Drop all tables and re-run every migration
    #[command(name = "migrate:fresh")]
    MigrateFresh,
}

/// Fluent application builder
pub struct Application<M = NoMigrator>
where
    M: MigratorTrait,
{
    config_fn: Option<Box<dyn FnOnce()>>,
    bootstrap_fn: Option<BootstrapFn>,
    routes_fn: Option<RoutesFn>,
    _migrator: PhantomData<M>,
}

/// Migrator with no migrations
pub struct NoMigrator;

impl MigratorTrait for NoMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![]
    }
}

impl Application<NoMigrator> {
    pub fn new() -> Self {
        Application {
            config_fn: None,
            bootstrap_fn: None,
            routes_fn: None,
            _migrator: PhantomData,
        }
    }
}

impl Default for Application<NoMigrator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Application<M>
where
    M: MigratorTrait,
{
    /// Register application config, called right after `.env` loading
    pub fn config<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.config_fn = Some(Box::new(f));
        self
    }

    /// Register services and middleware before the server starts
    pub fn bootstrap<F, Fut>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), FrameworkError>> + Send + 'static,
    {
        self.bootstrap_fn = Some(Box::new(move || Box::pin(f())));
        self
    }

    pub fn routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Router + Send + 'static,
    {
        self.routes_fn = Some(Box::new(f));
        self
    }

    pub fn migrations<NewM>(self) -> Application<NewM>
    where
        NewM: MigratorTrait,
    {
        Application {
            config_fn: self.config_fn,
            bootstrap_fn: self.bootstrap_fn,
            routes_fn: self.routes_fn,
            _migrator: PhantomData,
        }
    }

    /// Parse the command line and run the chosen command
    pub async fn run(self) -> Result<(), BoxError> {
        let cli = Cli::parse();

        Config::init(Path::new("."));
        if let Some(config_fn) = self.config_fn {
            config_fn();
        }
        logging::init(&Config::get::<AppConfig>().unwrap_or_else(AppConfig::from_env));

        match cli.command.unwrap_or(Commands::Serve { no_migrate: false }) {
            Commands::Serve { no_migrate } => {
                if !no_migrate {
                    let db = connect().await?;
                    M::up(db.inner(), None).await?;
                    tracing::info!("migrations up to date");
                }
                serve(self.bootstrap_fn, self.routes_fn).await
            }
            Commands::Migrate => {
                let db = connect().await?;
                M::up(db.inner(), None).await?;
                tracing::info!("migrations completed");
                Ok(())
            }
            Commands::MigrateStatus => {
                let db = connect().await?;
                M::status(db.inner()).await?;
                Ok(())
            }
            Commands::MigrateRollback { steps } => {
                let db = connect().await?;
                M::down(db.inner(), Some(steps)).await?;
                tracing::info!(steps, "rollback completed");
                Ok(())
            }
            Commands::MigrateFresh => {
                tracing::warn!("dropping all tables and re-running migrations");
                let db = connect().await?;
                M::fresh(db.inner()).await?;
                tracing::info!("database refreshed");
                Ok(())
            }
        }
    }
}

async fn connect() -> Result<DbConnection, FrameworkError> {
    let config = Config::get::<DatabaseConfig>().unwrap_or_else(DatabaseConfig::from_env);
    DbConnection::connect(&config).await
}

async fn serve(bootstrap_fn: Option<BootstrapFn>, routes_fn: Option<RoutesFn>) -> Result<(), BoxError> {
    if let Some(bootstrap_fn) = bootstrap_fn {
        bootstrap_fn().await?;
    }

    let router = routes_fn.map(|f| f()).unwrap_or_default();
    Server::from_config(router).run().await
}
