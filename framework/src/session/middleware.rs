use super::{FlashStore, MemoryFlashStore};
use crate::config::{Config, SessionConfig};
use crate::http::{HttpResponse, Request, Response};
use crate::middleware::{Middleware, Next};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Moves flash data from one response to the next request of the same client
///
/// Clients are told apart by a session cookie holding a random UUID. A
/// request without a usable cookie gets a fresh id, sent back with
/// `Set-Cookie` on whatever response the handler produces.
pub struct FlashMiddleware {
    store: Arc<dyn FlashStore>,
    config: SessionConfig,
}

impl FlashMiddleware {
    /// Use `store`, with the registered `SessionConfig` (or one read from the
    /// environment)
    pub fn new(store: Arc<dyn FlashStore>) -> Self {
        Self {
            store,
            config: Self::registered_config(),
        }
    }

    /// Backed by a fresh in-process store expiring entries after
    /// `SessionConfig::flash_ttl`
    pub fn memory() -> Self {
        let config = Self::registered_config();
        Self {
            store: Arc::new(MemoryFlashStore::with_ttl(config.flash_ttl)),
            config,
        }
    }

    fn registered_config() -> SessionConfig {
        Config::get::<SessionConfig>().unwrap_or_else(SessionConfig::from_env)
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    fn session_cookie(&self, session_id: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.config.cookie_name, session_id
        );
        if self.config.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    fn finish(&self, mut response: HttpResponse, session_id: &str, issued: bool) -> HttpResponse {
        if let Some(flash) = response.take_flash() {
            self.store.put(session_id, flash);
        }
        if issued {
            response = response.header("Set-Cookie", self.session_cookie(session_id));
        }
        response
    }
}

#[async_trait]
impl Middleware for FlashMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        let known = request
            .cookie(&self.config.cookie_name)
            .filter(|id| Uuid::parse_str(id).is_ok())
            .map(str::to_string);
        let issued = known.is_none();
        let session_id = known.unwrap_or_else(|| Uuid::new_v4().to_string());

        let incoming = self.store.take(&session_id);
        let response = next(request.with_flash(incoming)).await;

        match response {
            Ok(response) => Ok(self.finish(response, &session_id, issued)),
            Err(response) => Err(self.finish(response, &session_id, issued)),
        }
    }
}
