//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Quotebook                              │
//! │                                                                         │
//! │  handler: Result<T, ApiError>                                           │
//! │         │                                                               │
//! │         ├── bad JSON / path / query ─── Rejection ──────┐              │
//! │         ├── ValidationError (quotes-core) ──────────────┤              │
//! │         ├── CoreError (missing quote, empty filter) ────┤              │
//! │         └── DbError (quotes-db) ────────────────────────┤              │
//! │                                                         ▼              │
//! │                                                    ApiError            │
//! │                                                         │              │
//! │                                   IntoResponse          ▼              │
//! │                         status + {"message": "Quote with id=9 ..."}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Codes
//! | Cause | Status |
//! |---|---|
//! | missing resource | 404 |
//! | validation, malformed input, constraint violation | 400 |
//! | commit failure | 507 |
//! | pool exhausted, connection failure | 503 |
//! | any other storage failure | 500 |

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use quotes_core::{CoreError, ValidationError};
use quotes_db::DbError;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "message": "Quote with id=12 not found"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status of the response
    pub status: StatusCode,

    /// Human-readable error message
    pub message: String,
}

/// JSON body for errors and confirmations.
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessageBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::bad_request(err.to_string())
            }
            DbError::ConnectionFailed(e) => {
                error!("Database connection failed: {}", e);
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
            }
            DbError::PoolExhausted => {
                error!("Database pool exhausted");
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
            }
            DbError::TransactionFailed(e) => {
                error!("Transaction failed: {}", e);
                ApiError::new(StatusCode::INSUFFICIENT_STORAGE, "Database transaction failed")
            }
            DbError::MigrationFailed(e) => {
                error!("Database migration failed: {}", e);
                ApiError::internal("Database operation failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                error!("Database query failed: {}", e);
                ApiError::internal("Database operation failed")
            }
            DbError::Internal(e) => {
                error!("Internal database error: {}", e);
                ApiError::internal("Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::QuoteNotFound(_)
            | CoreError::AuthorNotFound(_)
            | CoreError::EmptyStore
            | CoreError::NoMatchingQuotes => ApiError::not_found(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
