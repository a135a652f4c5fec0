use crate::http::{HttpResponse, Request};
use crate::middleware::{Middleware, MiddlewareChain, MiddlewareRegistry};
use crate::routing::Router;
use std::sync::Arc;

/// Turns a buffered request into a response
///
/// Shared by [`Server`](crate::Server) and
/// [`TestClient`](crate::testing::TestClient), so tests exercise the same
/// routing and middleware as production.
#[derive(Clone)]
pub struct Kernel {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
}

impl Kernel {
    pub fn new(router: Router, middleware: MiddlewareRegistry) -> Self {
        Self {
            router: Arc::new(router),
            middleware,
        }
    }

    /// Kernel using the middleware registered with `global_middleware!`
    pub fn from_global(router: Router) -> Self {
        Self::new(router, MiddlewareRegistry::from_global())
    }

    /// Add global middleware, run after what is already registered
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    /// Global middleware runs before route middleware; unmatched requests get
    /// a plain 404.
    pub async fn handle(&self, request: Request) -> HttpResponse {
        let Some(matched) = self.router.match_route(request.method(), request.path()) else {
            tracing::debug!(method = %request.method(), path = request.path(), "no route");
            return HttpResponse::text("404 Not Found").status(404);
        };

        let mut chain = MiddlewareChain::new();
        chain.extend(self.middleware.global_middleware().iter().cloned());
        chain.extend(matched.middleware);

        let request = request.with_params(matched.params);
        chain
            .execute(request, matched.handler)
            .await
            .unwrap_or_else(|response| response)
    }
}
