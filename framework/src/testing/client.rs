use crate::http::{HttpResponse, Request};
use crate::kernel::Kernel;
use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::routing::Router;
use bytes::Bytes;
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Drives a router through the [`Kernel`] without opening a socket
///
/// Cookies set by responses are replayed on later requests, so a flash set
/// before a redirect shows up on the page fetched next.
pub struct TestClient {
    kernel: Kernel,
    cookies: Mutex<BTreeMap<String, String>>,
}

impl TestClient {
    /// Client without global middleware
    pub fn new(router: Router) -> Self {
        Self::with_kernel(Kernel::new(router, MiddlewareRegistry::new()))
    }

    pub fn with_kernel(kernel: Kernel) -> Self {
        Self {
            kernel,
            cookies: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.kernel = self.kernel.middleware(middleware);
        self
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None, Bytes::new()).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, None, Bytes::new()).await
    }

    /// POST `application/x-www-form-urlencoded` fields
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).unwrap_or_default();
        self.send(
            Method::POST,
            path,
            Some("application/x-www-form-urlencoded"),
            Bytes::from(body),
        )
        .await
    }

    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> TestResponse {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> TestResponse {
        self.send_json(Method::PUT, path, body).await
    }

    /// Send a raw body with the given content type
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        content_type: &str,
        body: impl Into<Bytes>,
    ) -> TestResponse {
        self.send(method, path, Some(content_type), body.into()).await
    }

    /// GET the `Location` of a redirect
    pub async fn follow(&self, response: &TestResponse) -> TestResponse {
        let location = response
            .header("location")
            .unwrap_or_else(|| panic!("response {} has no Location header", response.status()))
            .to_string();
        self.get(&location).await
    }

    async fn send_json<T: Serialize>(&self, method: Method, path: &str, body: &T) -> TestResponse {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.send(method, path, Some("application/json"), Bytes::from(body))
            .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        body: Bytes,
    ) -> TestResponse {
        let mut builder = http::Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        if let Some(cookie) = self.cookie_header() {
            builder = builder.header("Cookie", cookie);
        }
        let request = builder
            .body(body)
            .unwrap_or_else(|e| panic!("invalid test request for {}: {}", path, e));

        let response = self.kernel.handle(Request::new(request)).await;
        self.remember_cookies(&response);
        TestResponse::from(response)
    }

    fn cookie_header(&self) -> Option<String> {
        let jar = self.cookies.lock().ok()?;
        if jar.is_empty() {
            return None;
        }
        Some(
            jar.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    fn remember_cookies(&self, response: &HttpResponse) {
        let Ok(mut jar) = self.cookies.lock() else {
            return;
        };
        for (name, value) in response.headers() {
            if !name.eq_ignore_ascii_case("set-cookie") {
                continue;
            }
            let pair = value.split(';').next().unwrap_or_default();
            if let Some((key, val)) = pair.trim().split_once('=') {
                jar.insert(key.to_string(), val.to_string());
            }
        }
    }
}

/// Response captured by [`TestClient`] with chainable assertions
#[derive(Debug)]
pub struct TestResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl From<HttpResponse> for TestResponse {
    fn from(response: HttpResponse) -> Self {
        Self {
            status: response.status_code(),
            headers: response.headers().to_vec(),
            body: response.body_bytes().clone(),
        }
    }
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON, panicking with the raw body on failure
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("response is not valid JSON ({}): {}", e, self.text()))
    }

    pub fn assert_status(&self, expected: u16) -> &Self {
        if self.status != expected {
            panic!(
                "\n  assert_status\n\n  Expected: {}\n  Received: {}\n  Body: {}\n",
                expected,
                self.status,
                self.text()
            );
        }
        self
    }

    /// Assert a 302 to `location`
    pub fn assert_redirect(&self, location: &str) -> &Self {
        self.assert_status(302);
        let actual = self.header("location");
        if actual != Some(location) {
            panic!(
                "\n  assert_redirect\n\n  Expected: {:?}\n  Received: {:?}\n",
                location, actual
            );
        }
        self
    }

    /// Assert the body contains `needle`
    pub fn assert_see(&self, needle: &str) -> &Self {
        let text = self.text();
        if !text.contains(needle) {
            panic!(
                "\n  assert_see\n\n  Expected body to contain: {:?}\n  Body: {}\n",
                needle, text
            );
        }
        self
    }

    pub fn assert_dont_see(&self, needle: &str) -> &Self {
        let text = self.text();
        if text.contains(needle) {
            panic!(
                "\n  assert_dont_see\n\n  Expected body not to contain: {:?}\n  Body: {}\n",
                needle, text
            );
        }
        self
    }
}
