//! Typed error handling for slug routing
//!
//! # Error Categories
//!
//! - [`RouteError`]: Errors raised while resolving or building routes
//! - [`ConfigError`]: Errors related to configuration parsing and validation
//! - [`ValidationError`]: Errors related to input validation
//! - [`StorageError`]: Failures of the repository and locale collaborators
//!
//! Only [`RouteError::NotFound`] is part of normal control flow: single-name
//! resolution raises it, batch and path resolution absorb it.
//!
//! # Example
//!
//! ```rust,ignore
//! match provider.get_route_by_name(&"red-shirt".into()).await {
//!     Ok(route) => println!("{}", route.generate_path()),
//!     Err(RoutingError::Route(RouteError::NotFound { name })) => {
//!         println!("no entity is published under '{}'", name);
//!     }
//!     Err(e) => eprintln!("routing failed: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for slug routing
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Route resolution errors
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Collaborator failures, propagated unmodified
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RoutingError {
    /// Shorthand for a missing route
    pub fn not_found(name: impl Into<String>) -> Self {
        RoutingError::Route(RouteError::NotFound { name: name.into() })
    }

    /// Shorthand for registration misuse
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        RoutingError::Route(RouteError::InvalidArgument {
            message: message.into(),
        })
    }

    /// Whether this is the "no route for that name" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, RoutingError::Route(RouteError::NotFound { .. }))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RoutingError::Route(e) => e.status_code(),
            RoutingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RoutingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RoutingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RoutingError::Route(e) => e.error_code(),
            RoutingError::Config(_) => "CONFIG_ERROR",
            RoutingError::Validation(_) => "VALIDATION_ERROR",
            RoutingError::Storage(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RoutingError::Route(RouteError::NotFound { name }) => {
                Some(serde_json::json!({ "name": name }))
            }
            RoutingError::Route(RouteError::MissingField { class, field }) => {
                Some(serde_json::json!({ "class": class, "field": field }))
            }
            RoutingError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RoutingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Route Errors
// =============================================================================

/// Errors raised while resolving or building routes
#[derive(Debug, Error)]
pub enum RouteError {
    /// No configured class yields an entity for this name
    #[error("No route found for name '{name}'")]
    NotFound { name: String },

    /// Misuse at registration time
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The entity does not carry a value for its configured route field
    #[error("Entity of class '{class}' has no value for route field '{field}'")]
    MissingField { class: String, field: String },

    /// A path matcher could not be compiled
    #[error("Invalid route pattern for '{class}': {message}")]
    InvalidPattern { class: String, message: String },
}

impl RouteError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RouteError::NotFound { .. } => StatusCode::NOT_FOUND,
            RouteError::InvalidArgument { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RouteError::MissingField { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RouteError::InvalidPattern { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RouteError::NotFound { .. } => "ROUTE_NOT_FOUND",
            RouteError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            RouteError::MissingField { .. } => "ROUTE_FIELD_MISSING",
            RouteError::InvalidPattern { .. } => "INVALID_ROUTE_PATTERN",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to read or parse configuration
    #[error("Failed to parse configuration{}: {message}", .file.as_ref().map(|f| format!(" '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid configuration value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation failed for '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation failed: {}", .0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join(", "))]
    FieldErrors(Vec<FieldValidationError>),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Failures of the collaborators the resolver reads through
#[derive(Debug, Error)]
pub enum StorageError {
    /// A repository query failed
    #[error("Repository for '{class}' failed: {source}")]
    Repository {
        class: String,
        #[source]
        source: anyhow::Error,
    },

    /// The locale provider failed
    #[error("Locale provider failed: {source}")]
    LocaleProvider {
        #[source]
        source: anyhow::Error,
    },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Repository { .. } => "REPOSITORY_ERROR",
            StorageError::LocaleProvider { .. } => "LOCALE_PROVIDER_ERROR",
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;
