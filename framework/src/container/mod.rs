//! Service container
//!
//! Services are registered once at startup and resolved from handlers:
//!
//! ```rust,ignore
//! App::singleton(TaskService::new(repository));
//!
//! let tasks = App::resolve::<TaskService>()?;
//! ```
//!
//! Tests swap services per thread with [`TestContainer::fake`].

pub mod testing;

pub use testing::{TestContainer, TestContainerGuard};

use crate::error::FrameworkError;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

static APP_CONTAINER: OnceLock<RwLock<Container>> = OnceLock::new();

thread_local! {
    pub(crate) static TEST_CONTAINER: RefCell<Option<Container>> = const { RefCell::new(None) };
}

/// Type-erased service instances keyed by `TypeId`
#[derive(Default)]
pub struct Container {
    bindings: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared instance of a concrete type
    pub fn singleton<T: Any + Send + Sync + 'static>(&mut self, instance: T) {
        self.bindings.insert(TypeId::of::<T>(), Arc::new(instance));
    }

    pub fn get<T: Any + Send + Sync + Clone + 'static>(&self) -> Option<T> {
        self.bindings
            .get(&TypeId::of::<T>())?
            .downcast_ref::<T>()
            .cloned()
    }

    pub fn has<T: Any + 'static>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
    }
}

/// Global container facade
///
/// Lookups consult the current thread's test container first.
pub struct App;

impl App {
    fn global() -> &'static RwLock<Container> {
        APP_CONTAINER.get_or_init(|| RwLock::new(Container::new()))
    }

    pub fn singleton<T: Any + Send + Sync + 'static>(instance: T) {
        if let Ok(mut c) = Self::global().write() {
            c.singleton(instance);
        }
    }

    pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
        let faked = TEST_CONTAINER.with(|c| c.borrow().as_ref().and_then(|c| c.get::<T>()));
        if faked.is_some() {
            return faked;
        }
        APP_CONTAINER.get()?.read().ok()?.get::<T>()
    }

    /// Resolve a concrete type or fail with a 500-mapped error
    pub fn resolve<T: Any + Send + Sync + Clone + 'static>() -> Result<T, FrameworkError> {
        Self::get::<T>().ok_or_else(FrameworkError::service_not_found::<T>)
    }

    pub fn has<T: Any + 'static>() -> bool {
        let faked = TEST_CONTAINER.with(|c| {
            c.borrow()
                .as_ref()
                .map(|c| c.has::<T>())
                .unwrap_or(false)
        });
        faked
            || APP_CONTAINER
                .get()
                .and_then(|c| c.read().ok())
                .map(|c| c.has::<T>())
                .unwrap_or(false)
    }
}
