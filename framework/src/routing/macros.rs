//! Declarative route tables
//!
//! ```rust,ignore
//! routes! {
//!     get!("/", controllers::task_web::index).name("tasks.index"),
//!     post!("/add", controllers::task_web::store).name("tasks.store"),
//!
//!     group!("/tasks", {
//!         get!("/", controllers::task_api::index).name("api.tasks.index"),
//!         get!("/{id}", controllers::task_api::show).name("api.tasks.show"),
//!     }),
//! }
//! ```

use crate::http::{Request, Response};
use crate::middleware::{into_boxed, BoxedMiddleware, Middleware};
use crate::routing::router::{boxed_handler, register_route_name, BoxedHandler, Router};
use http::Method;
use std::future::Future;
use std::sync::Arc;

/// Reject route paths that do not start with `/`
///
/// Evaluated in a `const` context by the route macros, so a bad path fails
/// the build.
pub const fn validate_route_path(path: &'static str) -> &'static str {
    let bytes = path.as_bytes();
    if bytes.is_empty() || bytes[0] != b'/' {
        panic!("Route path must start with '/'")
    }
    path
}

/// One route with its optional name and middleware
pub struct RouteDef<H> {
    method: Method,
    path: &'static str,
    handler: H,
    name: Option<&'static str>,
    middleware: Vec<BoxedMiddleware>,
}

impl<H, Fut> RouteDef<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    pub fn new(method: Method, path: &'static str, handler: H) -> Self {
        Self {
            method,
            path,
            handler,
            name: None,
            middleware: Vec::new(),
        }
    }

    /// Name the route for [`route`](crate::route) and `Redirect::route`
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(into_boxed(middleware));
        self
    }

    pub fn register(self, router: Router) -> Router {
        self.into_group_route().register("", &[], router)
    }

    pub fn into_group_route(self) -> GroupRoute {
        GroupRoute {
            method: self.method,
            path: self.path,
            handler: boxed_handler(self.handler),
            name: self.name,
            middleware: self.middleware,
        }
    }
}

/// A type-erased route waiting to be mounted under a prefix
pub struct GroupRoute {
    method: Method,
    path: &'static str,
    handler: Arc<BoxedHandler>,
    name: Option<&'static str>,
    middleware: Vec<BoxedMiddleware>,
}

impl GroupRoute {
    fn register(self, prefix: &str, shared: &[BoxedMiddleware], mut router: Router) -> Router {
        let full_path = if self.path == "/" && !prefix.is_empty() {
            prefix.to_string()
        } else {
            format!("{}{}", prefix, self.path)
        };

        router.add(self.method.clone(), &full_path, self.handler);
        if let Some(name) = self.name {
            register_route_name(name, &full_path);
        }
        // group middleware wraps route middleware
        for mw in shared.iter().cloned().chain(self.middleware) {
            router.add_middleware(self.method.clone(), &full_path, mw);
        }
        router
    }
}

/// Routes sharing a path prefix and middleware
pub struct GroupDef {
    prefix: &'static str,
    routes: Vec<GroupRoute>,
    middleware: Vec<BoxedMiddleware>,
}

impl GroupDef {
    /// Use `group!`, which checks the prefix at compile time
    #[doc(hidden)]
    pub fn __new_unchecked(prefix: &'static str) -> Self {
        Self {
            prefix,
            routes: Vec::new(),
            middleware: Vec::new(),
        }
    }

    pub fn route<H, Fut>(mut self, route: RouteDef<H>) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.routes.push(route.into_group_route());
        self
    }

    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(into_boxed(middleware));
        self
    }

    /// Mount every route under the prefix; `/` maps to the bare prefix
    pub fn register(self, router: Router) -> Router {
        let prefix = self.prefix;
        let shared = self.middleware;
        self.routes
            .into_iter()
            .fold(router, |router, route| route.register(prefix, &shared, router))
    }
}

#[macro_export]
macro_rules! get {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__get_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __get_impl<H, Fut>(path: &'static str, handler: H) -> RouteDef<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDef::new(Method::GET, path, handler)
}

#[macro_export]
macro_rules! post {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__post_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __post_impl<H, Fut>(path: &'static str, handler: H) -> RouteDef<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDef::new(Method::POST, path, handler)
}

#[macro_export]
macro_rules! put {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__put_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __put_impl<H, Fut>(path: &'static str, handler: H) -> RouteDef<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDef::new(Method::PUT, path, handler)
}

#[macro_export]
macro_rules! delete {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__delete_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __delete_impl<H, Fut>(path: &'static str, handler: H) -> RouteDef<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDef::new(Method::DELETE, path, handler)
}

/// Group routes under a prefix
///
/// ```rust,ignore
/// group!("/tasks", {
///     get!("/", controllers::task_api::index),       // GET /tasks
///     delete!("/{id}", controllers::task_api::destroy), // DELETE /tasks/{id}
/// })
/// ```
#[macro_export]
macro_rules! group {
    ($prefix:expr, { $( $route:expr ),* $(,)? }) => {{
        const _: &str = $crate::validate_route_path($prefix);
        let mut group = $crate::GroupDef::__new_unchecked($prefix);
        $(
            group = group.route($route);
        )*
        group
    }};
}

/// Generate `pub fn register() -> Router` from route and group definitions
#[macro_export]
macro_rules! routes {
    ( $( $route:expr ),* $(,)? ) => {
        pub fn register() -> $crate::Router {
            let mut router = $crate::Router::new();
            $(
                router = $route.register(router);
            )*
            router
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::http::{HttpResponse, Request, Response};
    use http::Method;

    async fn ok(_req: Request) -> Response {
        Ok(HttpResponse::text("ok"))
    }

    mod table {
        use super::ok;

        crate::routes! {
            crate::get!("/", ok).name("macro-test.home"),
            crate::group!("/api/items", {
                crate::get!("/", ok).name("macro-test.items"),
                crate::put!("/{id}", ok).name("macro-test.items.update"),
            }),
        }
    }

    #[test]
    fn group_prefixes_paths() {
        let router = table::register();

        assert!(router.match_route(&Method::GET, "/").is_some());
        assert!(router.match_route(&Method::GET, "/api/items").is_some());
        assert!(router.match_route(&Method::PUT, "/api/items/5").is_some());
        assert!(router.match_route(&Method::GET, "/api/items/5").is_none());
        assert_eq!(
            crate::route("macro-test.items.update", &[("id", "5")]),
            Some("/api/items/5".to_string())
        );
    }
}
