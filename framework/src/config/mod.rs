//! Typed configuration loaded from `.env` files and the process environment
//!
//! ```rust,ignore
//! Config::init(Path::new("."));
//! let server = Config::get::<ServerConfig>().unwrap_or_else(ServerConfig::from_env);
//! ```

pub mod env;
pub mod providers;
pub mod repository;

pub use env::{env, env_optional, load_dotenv, Environment};
pub use providers::{AppConfig, ServerConfig, SessionConfig};

use crate::database::DatabaseConfig;
use std::any::Any;
use std::path::Path;

/// Facade over the global config repository
pub struct Config;

impl Config {
    /// Load `.env` files from `project_root` and register the built-in
    /// config structs
    ///
    /// Returns the detected environment.
    pub fn init(project_root: &Path) -> Environment {
        let environment = env::load_dotenv(project_root);

        repository::register(AppConfig::from_env());
        repository::register(ServerConfig::from_env());
        repository::register(SessionConfig::from_env());
        repository::register(DatabaseConfig::from_env());

        environment
    }

    /// Fetch a copy of a registered config struct
    pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
        repository::get::<T>()
    }

    /// Register (or replace) a config struct
    pub fn register<T: Any + Send + Sync + 'static>(config: T) {
        repository::register(config);
    }
}
