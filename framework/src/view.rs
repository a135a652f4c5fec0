//! HTML templates rendered with Tera

use crate::error::FrameworkError;
use crate::http::HttpResponse;
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};

/// Compiled template set, cheap to clone
#[derive(Clone)]
pub struct View {
    tera: Arc<Tera>,
}

impl View {
    /// Compile `(name, source)` pairs
    ///
    /// Names ending in `.html` are autoescaped.
    pub fn new(templates: &[(&str, &str)]) -> Result<Self, FrameworkError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_templates(templates.iter().copied())
            .map_err(|e| FrameworkError::internal(format!("Template error: {}", describe(&e))))?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render a template into a `text/html` response
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<HttpResponse, FrameworkError> {
        let context = Context::from_serialize(context)
            .map_err(|e| FrameworkError::internal(format!("Invalid template context: {}", e)))?;
        let html = self.tera.render(name, &context).map_err(|e| {
            FrameworkError::internal(format!("Failed to render {}: {}", name, describe(&e)))
        })?;
        Ok(HttpResponse::html(html))
    }

    pub fn has(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

/// Tera nests the useful message in the error's source chain
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_with_autoescape() {
        let view = View::new(&[("hello.html", "<p>{{ name }}</p>")]).unwrap();

        let response = view.render("hello.html", &json!({ "name": "<b>milk</b>" })).unwrap();

        assert_eq!(response.header_value("content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(
            response.body_bytes().as_ref(),
            b"<p>&lt;b&gt;milk&lt;&#x2F;b&gt;</p>"
        );
    }

    #[test]
    fn unknown_template_is_internal_error() {
        let view = View::new(&[]).unwrap();
        let err = view.render("missing.html", &json!({})).unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn syntax_errors_fail_construction() {
        assert!(View::new(&[("broken.html", "{% if %}")]).is_err());
    }
}
