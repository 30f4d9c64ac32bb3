//! Unified application error types for TradeHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested entity was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// A database error occurred (prepare, execute, connection).
    Database,
    /// A row could not be decoded into an entity (column/type mismatch).
    Scan,
    /// The operation did not complete within its deadline.
    Timeout,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Scan => write!(f, "SCAN"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The business entity an error refers to.
///
/// Carried on not-found errors so callers can tell a missing user apart
/// from a missing customer without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// A registered user account.
    User,
    /// A customer record.
    Customer,
    /// A product in the catalog.
    Product,
    /// An invoice (header plus items).
    Invoice,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Customer => write!(f, "customer"),
            Self::Product => write!(f, "product"),
            Self::Invoice => write!(f, "invoice"),
        }
    }
}

/// The unified application error used throughout TradeHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// The entity this error refers to, when known.
    pub resource: Option<Resource>,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            resource: None,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            resource: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error for the given entity.
    pub fn not_found(resource: Resource, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            resource: Some(resource),
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attach the entity this error refers to.
    pub fn for_resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Check whether this is a not-found error for the given entity.
    pub fn is_not_found(&self, resource: Resource) -> bool {
        self.kind == ErrorKind::NotFound && self.resource == Some(resource)
    }

    /// The HTTP status code the transport layer should report for this error.
    ///
    /// Not-found is always 404 (never 204), validation is 400, conflicts
    /// are 409, timeouts are 504. Everything else is a generic 500; the
    /// underlying cause is for logs, not for clients.
    pub fn http_status(&self) -> u16 {
        match self.kind {
            ErrorKind::NotFound => 404,
            ErrorKind::Validation => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::Timeout => 504,
            _ => 500,
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            resource: self.resource,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable_per_resource() {
        let err = AppError::not_found(Resource::User, "User 7 not found");
        assert!(err.is_not_found(Resource::User));
        assert!(!err.is_not_found(Resource::Customer));

        let err = AppError::not_found(Resource::Customer, "Customer 7 not found");
        assert!(err.is_not_found(Resource::Customer));
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(AppError::validation("bad email").http_status(), 400);
        assert_eq!(
            AppError::not_found(Resource::Product, "gone").http_status(),
            404
        );
        assert_eq!(AppError::conflict("duplicate").http_status(), 409);
        assert_eq!(AppError::timeout("pool").http_status(), 504);
        assert_eq!(AppError::database("boom").http_status(), 500);
        assert_eq!(AppError::configuration("engine").http_status(), 500);
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::database("connection refused");
        assert_eq!(err.to_string(), "DATABASE: connection refused");
    }
}
