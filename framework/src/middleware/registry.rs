//! Global middleware registration
//!
//! The application bootstrap registers middleware with `global_middleware!`;
//! `Server::from_config` picks them up through
//! [`MiddlewareRegistry::from_global`].

use super::{into_boxed, BoxedMiddleware, Middleware};
use std::sync::{OnceLock, RwLock};

static GLOBAL_MIDDLEWARE: OnceLock<RwLock<Vec<BoxedMiddleware>>> = OnceLock::new();

/// Register middleware that runs on every request
pub fn register_global_middleware<M: Middleware + 'static>(middleware: M) {
    let registry = GLOBAL_MIDDLEWARE.get_or_init(|| RwLock::new(Vec::new()));
    if let Ok(mut list) = registry.write() {
        list.push(into_boxed(middleware));
    }
}

/// Snapshot of the globally registered middleware
pub fn get_global_middleware() -> Vec<BoxedMiddleware> {
    GLOBAL_MIDDLEWARE
        .get()
        .and_then(|lock| lock.read().ok())
        .map(|list| list.clone())
        .unwrap_or_default()
}

/// Middleware applied to every request a server or test client handles
#[derive(Default, Clone)]
pub struct MiddlewareRegistry {
    global: Vec<BoxedMiddleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from whatever was registered with `global_middleware!`
    pub fn from_global() -> Self {
        Self {
            global: get_global_middleware(),
        }
    }

    /// Append middleware; it runs after everything already registered
    pub fn append<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.global.push(into_boxed(middleware));
        self
    }

    pub fn global_middleware(&self) -> &[BoxedMiddleware] {
        &self.global
    }
}
