use crate::error::FrameworkError;
use crate::routing::route;
use crate::session::Flash;
use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;

/// HTTP response under construction
///
/// Besides status, headers and body it can carry outgoing [`Flash`] data,
/// which [`FlashMiddleware`](crate::session::FlashMiddleware) lifts off the
/// response and stores for the next request.
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    body: Bytes,
    headers: Vec<(String, String)>,
    flash: Option<Flash>,
}

/// Handler return type; `Err` short-circuits with an error response so `?`
/// works inside controllers.
pub type Response = Result<HttpResponse, HttpResponse>;

impl HttpResponse {
    /// Empty 200 response
    pub fn new() -> Self {
        Self {
            status: 200,
            body: Bytes::new(),
            headers: Vec::new(),
            flash: None,
        }
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self::new()
            .body(body.into())
            .header("Content-Type", "text/plain; charset=utf-8")
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self::new()
            .body(body.into())
            .header("Content-Type", "text/html; charset=utf-8")
    }

    pub fn json(body: serde_json::Value) -> Self {
        Self::new()
            .body(body.to_string())
            .header("Content-Type", "application/json")
    }

    /// Serialize any value as the JSON body
    pub fn json_of<T: Serialize>(value: &T) -> Result<Self, FrameworkError> {
        let body = serde_json::to_string(value)
            .map_err(|e| FrameworkError::internal(format!("Failed to encode JSON: {}", e)))?;
        Ok(Self::new()
            .body(body)
            .header("Content-Type", "application/json"))
    }

    /// 204 with an empty body
    pub fn no_content() -> Self {
        Self::new().status(204)
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach flash data to be shown on the next request
    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }

    /// Remove and return the outgoing flash data
    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }

    pub fn ok(self) -> Response {
        Ok(self)
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// First header value with the given name (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    /// Convert to a hyper response
    ///
    /// A header that hyper refuses turns the whole response into a bare 500.
    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder.body(Full::new(self.body)).unwrap_or_else(|err| {
            tracing::error!(error = %err, "invalid response, replacing with 500");
            let mut fallback = hyper::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Redirect response builder (302 by default)
///
/// # Example
///
/// ```rust,ignore
/// return Redirect::to("/").with("message", "Task added successfully!").into();
/// ```
#[derive(Debug)]
pub struct Redirect {
    location: String,
    status: u16,
    flash: Flash,
}

impl Redirect {
    /// Redirect to a path or URL
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            location: path.into(),
            status: 302,
            flash: Flash::default(),
        }
    }

    /// Redirect to a named route, substituting `{param}` placeholders
    pub fn route(name: &str, params: &[(&str, &str)]) -> Result<Self, FrameworkError> {
        route(name, params)
            .map(Self::to)
            .ok_or_else(|| FrameworkError::internal(format!("Route '{}' not found", name)))
    }

    /// Flash a value for the request that follows the redirect
    pub fn with<V: Serialize>(mut self, key: &str, value: V) -> Self {
        self.flash.put(key, value);
        self
    }
}

impl From<Redirect> for HttpResponse {
    fn from(redirect: Redirect) -> HttpResponse {
        let response = HttpResponse::new()
            .status(redirect.status)
            .header("Location", redirect.location);
        if redirect.flash.is_empty() {
            response
        } else {
            response.with_flash(redirect.flash)
        }
    }
}

impl From<Redirect> for Response {
    fn from(redirect: Redirect) -> Response {
        Ok(redirect.into())
    }
}

/// Render a [`FrameworkError`] as a JSON error response
impl From<FrameworkError> for HttpResponse {
    fn from(err: FrameworkError) -> HttpResponse {
        let status = err.status_code();
        let body = match &err {
            FrameworkError::Validation(errors) => errors.to_json(),
            _ => serde_json::json!({ "error": err.to_string() }),
        };
        if status >= 500 {
            tracing::error!(error = %err, "request failed");
        }
        HttpResponse::json(body).status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrors;
    use pretty_assertions::assert_eq;

    #[test]
    fn redirect_carries_location_and_flash() {
        let mut response: HttpResponse = Redirect::to("/").with("message", "Saved").into();

        assert_eq!(response.status_code(), 302);
        assert_eq!(response.header_value("location"), Some("/"));
        let flash = response.take_flash().unwrap();
        assert_eq!(flash.text("message"), Some("Saved"));
        assert!(response.take_flash().is_none());
    }

    #[test]
    fn redirect_without_flash_carries_none() {
        let mut response: HttpResponse = Redirect::to("/edit/3").into();
        assert!(response.take_flash().is_none());
    }

    #[test]
    fn validation_error_uses_errors_body() {
        let mut errors = ValidationErrors::new();
        errors.add("description", "required");
        let response: HttpResponse = FrameworkError::Validation(errors).into();

        assert_eq!(response.status_code(), 422);
        let body: serde_json::Value = serde_json::from_slice(response.body_bytes()).unwrap();
        assert_eq!(body["errors"]["description"][0], "required");
    }

    #[test]
    fn no_content_is_empty() {
        let response = HttpResponse::no_content();
        assert_eq!(response.status_code(), 204);
        assert!(response.body_bytes().is_empty());
    }
}
