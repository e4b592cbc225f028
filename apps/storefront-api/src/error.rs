//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront API                     │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │         │                                                               │
//! │         ├── Bad path / query / body ── axum rejection ──┐              │
//! │         │                                               │              │
//! │         ├── ValidationError / CoreError ────────────────┤              │
//! │         │                                               ▼              │
//! │         ├── DbError (NotFound, pool, query...) ───── ApiError          │
//! │         │                                               │              │
//! │         ▼                                               ▼              │
//! │  Success → JSON body              IntoResponse → status + JSON body    │
//! │                                                                         │
//! │  { "code": "CART_CHECKED_OUT", "message": "Cart 3 is already ..." }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged with their details; clients only get a
//! generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use storefront_core::{CoreError, ValidationError};
use storefront_db::DbError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Mutation of a checked-out cart (400)
    CartCheckedOut,

    /// Database operation failed (500)
    DatabaseError,

    /// Database unreachable (503)
    ServiceUnavailable,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::CartCheckedOut => StatusCode::BAD_REQUEST,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::Domain(core) => core.into(),
            DbError::UniqueViolation { field, value } => ApiError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::ServiceUnavailable, "Database unavailable")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::ServiceUnavailable, "Database unavailable")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CartCheckedOut { .. } => {
                ApiError::new(ErrorCode::CartCheckedOut, err.to_string())
            }
            CoreError::SubtotalOverflow { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

// =============================================================================
// Extractor rejections
// =============================================================================

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(format!("Invalid request payload: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(format!("Invalid ID: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(format!("Invalid query: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DbError::not_found("Cart", 1), StatusCode::NOT_FOUND),
            (
                DbError::Domain(CoreError::CartCheckedOut { cart_id: 1 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ValidationError::Required {
                    field: "name".to_string(),
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                DbError::UniqueViolation {
                    field: "products.name".to_string(),
                    value: "Tea".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DbError::Domain(CoreError::SubtotalOverflow { cart_id: 2 }),
                StatusCode::BAD_REQUEST,
            ),
            (DbError::PoolExhausted, StatusCode::SERVICE_UNAVAILABLE),
            (
                DbError::ConnectionFailed("closed".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DbError::QueryFailed("syntax".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_checked_out_code_and_message() {
        let err: ApiError = DbError::Domain(CoreError::CartCheckedOut { cart_id: 3 }).into();
        assert_eq!(err.code, ErrorCode::CartCheckedOut);
        assert_eq!(err.message, "Cart 3 is already checked out");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err: ApiError = DbError::QueryFailed("no such table: secrets".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("secrets"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Product", "9")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 9");
    }
}
