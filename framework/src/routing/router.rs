use crate::http::{Request, Response};
use crate::middleware::{BoxFuture, BoxedMiddleware};
use http::Method;
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, OnceLock, RwLock};

/// Route name to path pattern, filled as routes are registered
static ROUTE_REGISTRY: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

pub fn register_route_name(name: &str, path: &str) {
    let registry = ROUTE_REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(mut map) = registry.write() {
        map.insert(name.to_string(), path.to_string());
    }
}

/// Build the URL of a named route
///
/// ```rust,ignore
/// assert_eq!(route("tasks.edit", &[("id", "3")]), Some("/edit/3".to_string()));
/// ```
pub fn route(name: &str, params: &[(&str, &str)]) -> Option<String> {
    let registry = ROUTE_REGISTRY.get()?.read().ok()?;
    let mut url = registry.get(name)?.clone();
    for (key, value) in params {
        url = url.replace(&format!("{{{}}}", key), value);
    }
    Some(url)
}

pub type BoxedHandler = Box<dyn Fn(Request) -> BoxFuture + Send + Sync>;

#[derive(Clone)]
struct Route {
    handler: Arc<BoxedHandler>,
    pattern: Arc<str>,
}

/// Result of matching a request against the routing table
pub struct RouteMatch {
    pub handler: Arc<BoxedHandler>,
    pub params: HashMap<String, String>,
    /// Route-level middleware, outermost first
    pub middleware: Vec<BoxedMiddleware>,
}

/// Per-method routing tables
///
/// Route middleware is keyed by method and path pattern, so `/edit/{id}`
/// carries the same middleware for every id.
pub struct Router {
    tables: HashMap<Method, MatchitRouter<Route>>,
    middleware: HashMap<(Method, String), Vec<BoxedMiddleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            middleware: HashMap::new(),
        }
    }

    /// Insert a handler for `method` and `path`
    ///
    /// A path that conflicts with one already registered is logged and
    /// skipped.
    pub fn add(&mut self, method: Method, path: &str, handler: Arc<BoxedHandler>) {
        let route = Route {
            handler,
            pattern: Arc::from(path),
        };
        let table = self
            .tables
            .entry(method.clone())
            .or_insert_with(MatchitRouter::new);
        if let Err(err) = table.insert(path, route) {
            tracing::error!(%method, path, error = %err, "route not registered");
        }
    }

    pub fn add_middleware(&mut self, method: Method, path: &str, middleware: BoxedMiddleware) {
        self.middleware
            .entry((method, path.to_string()))
            .or_default()
            .push(middleware);
    }

    pub fn get<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.with(Method::GET, path, handler)
    }

    pub fn post<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.with(Method::POST, path, handler)
    }

    pub fn put<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.with(Method::PUT, path, handler)
    }

    pub fn delete<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.with(Method::DELETE, path, handler)
    }

    fn with<H, Fut>(mut self, method: Method, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add(method, path, boxed_handler(handler));
        self
    }

    /// Find the handler for a request
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let matched = self.tables.get(method)?.at(path).ok()?;
        let route = matched.value;

        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let middleware = self
            .middleware
            .get(&(method.clone(), route.pattern.to_string()))
            .cloned()
            .unwrap_or_default();

        Some(RouteMatch {
            handler: route.handler.clone(),
            params,
            middleware,
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn boxed_handler<H, Fut>(handler: H) -> Arc<BoxedHandler>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let boxed: BoxedHandler = Box::new(move |req| Box::pin(handler(req)) as BoxFuture);
    Arc::new(boxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::middleware::{into_boxed, Middleware, Next};
    use async_trait::async_trait;

    async fn ok(_req: Request) -> Response {
        Ok(HttpResponse::text("ok"))
    }

    struct Noop;

    #[async_trait]
    impl Middleware for Noop {
        async fn handle(&self, request: Request, next: Next) -> Response {
            next(request).await
        }
    }

    #[test]
    fn matches_by_method_and_extracts_params() {
        let router = Router::new().get("/edit/{id}", ok).post("/update/{id}", ok);

        let matched = router.match_route(&Method::GET, "/edit/42").unwrap();
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));

        assert!(router.match_route(&Method::POST, "/edit/42").is_none());
        assert!(router.match_route(&Method::GET, "/missing").is_none());
    }

    #[test]
    fn route_middleware_follows_the_pattern() {
        let mut router = Router::new().get("/edit/{id}", ok);
        router.add_middleware(Method::GET, "/edit/{id}", into_boxed(Noop));

        assert_eq!(router.match_route(&Method::GET, "/edit/1").unwrap().middleware.len(), 1);
        assert_eq!(router.match_route(&Method::GET, "/edit/2").unwrap().middleware.len(), 1);
    }

    #[test]
    fn named_routes_substitute_params() {
        register_route_name("router-test.edit", "/edit/{id}");
        assert_eq!(
            route("router-test.edit", &[("id", "7")]),
            Some("/edit/7".to_string())
        );
        assert_eq!(route("router-test.unknown", &[]), None);
    }
}
