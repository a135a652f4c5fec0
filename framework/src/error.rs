//! Framework-wide error types
//!
//! [`FrameworkError`] is the error every layer propagates with `?`. It knows
//! its HTTP status and converts into an [`HttpResponse`](crate::HttpResponse),
//! so controllers can bail out of a handler without building the response by
//! hand.

use std::collections::BTreeMap;
use thiserror::Error;

/// Application errors that choose their own HTTP status
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, thiserror::Error)]
/// #[error("task {0} is archived")]
/// struct Archived(i64);
///
/// impl HttpError for Archived {
///     fn status_code(&self) -> u16 { 409 }
/// }
/// ```
pub trait HttpError: std::error::Error + Send + Sync + 'static {
    /// HTTP status code (default: 500)
    fn status_code(&self) -> u16 {
        500
    }
}

/// Field-keyed validation messages
///
/// Rendered as:
///
/// ```json
/// {
///     "message": "The given data was invalid.",
///     "errors": { "description": ["Task description cannot be empty!"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Field name to messages, ordered by field name
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Convert the `validator` crate's error set
    ///
    /// Rules without an explicit message fall back to a generic one naming
    /// the field.
    pub fn from_validator(errors: validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid.", field));
                result.add(field.to_string(), message);
            }
        }
        result
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "message": "The given data was invalid.",
            "errors": self.errors
        })
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: {:?}", self.errors)
    }
}

impl std::error::Error for ValidationErrors {}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::from_validator(errors)
    }
}

/// Framework-wide error type
#[derive(Debug, Clone, Error)]
pub enum FrameworkError {
    /// Nothing registered in the container for the requested type
    #[error("Service '{type_name}' not registered in container")]
    ServiceNotFound { type_name: &'static str },

    /// A route parameter the handler asked for is missing
    #[error("Missing required parameter: {param_name}")]
    ParamError { param_name: String },

    /// A route parameter could not be parsed into the expected type
    #[error("Invalid parameter '{param}': expected {expected_type}")]
    ParamParse {
        param: String,
        expected_type: &'static str,
    },

    /// The request body could not be decoded
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// The request body exceeded the configured limit
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Database error: {0}")]
    Database(String),

    /// A row expected to exist was not found
    #[error("{model_name} not found")]
    ModelNotFound { model_name: String },

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl FrameworkError {
    pub fn service_not_found<T: ?Sized>() -> Self {
        Self::ServiceNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::ParamError {
            param_name: name.into(),
        }
    }

    pub fn param_parse(param: impl Into<String>, expected_type: &'static str) -> Self {
        Self::ParamParse {
            param: param.into(),
            expected_type,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn model_not_found(name: impl Into<String>) -> Self {
        Self::ModelNotFound {
            model_name: name.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ServiceNotFound { .. } => 500,
            Self::ParamError { .. } => 400,
            Self::ParamParse { .. } => 400,
            Self::BadRequest { .. } => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::Database(_) => 500,
            Self::ModelNotFound { .. } => 404,
            Self::Validation(_) => 422,
            Self::Internal { .. } => 500,
        }
    }
}

impl From<sea_orm::DbErr> for FrameworkError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::RecordNotFound(name) => Self::ModelNotFound { model_name: name },
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for FrameworkError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
