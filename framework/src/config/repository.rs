use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

static CONFIG_REPOSITORY: OnceLock<RwLock<ConfigRepository>> = OnceLock::new();

/// Config structs stored by type
#[derive(Default)]
pub struct ConfigRepository {
    configs: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Any + Send + Sync + 'static>(&mut self, config: T) {
        self.configs.insert(TypeId::of::<T>(), Box::new(config));
    }

    pub fn get<T: Any + Send + Sync + Clone + 'static>(&self) -> Option<T> {
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
    }
}

fn global() -> &'static RwLock<ConfigRepository> {
    CONFIG_REPOSITORY.get_or_init(|| RwLock::new(ConfigRepository::new()))
}

pub fn register<T: Any + Send + Sync + 'static>(config: T) {
    if let Ok(mut repo) = global().write() {
        repo.register(config);
    }
}

pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
    CONFIG_REPOSITORY.get()?.read().ok()?.get::<T>()
}
