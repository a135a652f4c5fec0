//! Request middleware
//!
//! A middleware receives the request together with [`Next`], the rest of the
//! chain. It can rewrite the request, short-circuit with its own response, or
//! post-process what `next` returns.
//!
//! ```rust,ignore
//! pub struct Timing;
//!
//! #[async_trait]
//! impl Middleware for Timing {
//!     async fn handle(&self, request: Request, next: Next) -> Response {
//!         let started = Instant::now();
//!         let response = next(request).await;
//!         tracing::debug!(elapsed = ?started.elapsed());
//!         response
//!     }
//! }
//! ```

mod registry;

pub use registry::{get_global_middleware, register_global_middleware, MiddlewareRegistry};

use crate::http::{Request, Response};
use crate::routing::BoxedHandler;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future produced by handlers and middleware
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// The remainder of the middleware chain, ending in the route handler
pub type Next = Arc<dyn Fn(Request) -> BoxFuture + Send + Sync>;

#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next) -> Response;
}

/// Shared, type-erased middleware
pub type BoxedMiddleware = Arc<dyn Middleware>;

pub fn into_boxed<M: Middleware + 'static>(middleware: M) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// Register middleware that runs on every request, in registration order
///
/// ```rust,ignore
/// global_middleware!(LoggingMiddleware);
/// ```
#[macro_export]
macro_rules! global_middleware {
    ($middleware:expr) => {
        $crate::middleware::register_global_middleware($middleware)
    };
}

/// Ordered middleware for one request
#[derive(Default)]
pub struct MiddlewareChain {
    middleware: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, middleware: BoxedMiddleware) {
        self.middleware.push(middleware);
    }

    pub fn extend(&mut self, middleware: impl IntoIterator<Item = BoxedMiddleware>) {
        self.middleware.extend(middleware);
    }

    /// Run the chain, outermost middleware first, ending in `handler`
    pub async fn execute(self, request: Request, handler: Arc<BoxedHandler>) -> Response {
        let mut next: Next = Arc::new(move |req: Request| handler(req));

        for middleware in self.middleware.into_iter().rev() {
            let inner = next;
            next = Arc::new(move |req: Request| {
                let middleware = middleware.clone();
                let inner = inner.clone();
                Box::pin(async move { middleware.handle(req, inner).await }) as BoxFuture
            });
        }

        next(request).await
    }
}
