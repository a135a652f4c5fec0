use super::body::{parse_form, parse_json};
use crate::error::FrameworkError;
use crate::session::Flash;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::str::FromStr;

/// An incoming HTTP request with its body already buffered
///
/// The server collects the body before dispatch, so handlers and tests work
/// with the same type. Route parameters are filled in by the kernel once a
/// route matches; flash data is attached by
/// [`FlashMiddleware`](crate::session::FlashMiddleware).
pub struct Request {
    inner: http::Request<Bytes>,
    params: HashMap<String, String>,
    flash: Flash,
}

impl Request {
    pub fn new(inner: http::Request<Bytes>) -> Self {
        Self {
            inner,
            params: HashMap::new(),
            flash: Flash::default(),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = flash;
        self
    }

    pub fn method(&self) -> &http::Method {
        self.inner.method()
    }

    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// Get a route parameter by name (e.g. `id` for `/tasks/{id}`)
    pub fn param(&self, name: &str) -> Result<&str, FrameworkError> {
        self.params
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| FrameworkError::param(name))
    }

    /// Get a route parameter parsed into `T`
    ///
    /// A value that does not parse is reported as a 400 naming the expected
    /// type.
    pub fn param_as<T: FromStr>(&self, name: &str) -> Result<T, FrameworkError> {
        let raw = self.param(name)?;
        raw.parse()
            .map_err(|_| FrameworkError::param_parse(raw, std::any::type_name::<T>()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// Look up a cookie sent by the client
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.inner
            .headers()
            .get_all(http::header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Flash data handed over by the previous request
    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Parse the buffered body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_json(self.inner.body())
    }

    /// Parse the buffered body as `application/x-www-form-urlencoded`
    pub fn form<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_form(self.inner.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request_with_cookie(cookie: &str) -> Request {
        let inner = http::Request::builder()
            .uri("/edit/7")
            .header("Cookie", cookie)
            .body(Bytes::new())
            .unwrap();
        Request::new(inner)
    }

    #[test]
    fn reads_cookie_among_several() {
        let req = request_with_cookie("theme=dark; taskboard_session=abc-123; lang=en");
        assert_eq!(req.cookie("taskboard_session"), Some("abc-123"));
        assert_eq!(req.cookie("missing"), None);
        assert_eq!(req.header("cookie"), Some("theme=dark; taskboard_session=abc-123; lang=en"));
    }

    #[test]
    fn parses_typed_params() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "7".to_string());
        let req = request_with_cookie("").with_params(params);

        assert_eq!(req.param_as::<i64>("id").unwrap(), 7);
        assert_eq!(req.param("other").unwrap_err().status_code(), 400);
    }

    #[test]
    fn rejects_unparsable_params() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "seven".to_string());
        let req = request_with_cookie("").with_params(params);

        let err = req.param_as::<i64>("id").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Invalid parameter 'seven': expected i64");
    }
}
