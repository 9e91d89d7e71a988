//! # Error Types
//!
//! Domain-specific error types for quotes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quotes-core errors (this file)                                        │
//! │  ├── CoreError        - Missing resources, empty result sets           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quotes-db errors (separate crate)                                     │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  quotes-api errors (in app)                                            │
//! │  └── ApiError         - What HTTP clients see ({"message": ...})       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rating problems never show up here: an invalid rating is replaced by a
//! default (create) or dropped (update) in [`crate::validation`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised when a requested resource does not exist.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No quote has the requested id.
    #[error("Quote with id={0} not found")]
    QuoteNotFound(i64),

    /// No author has the requested id.
    #[error("Author with id={0} not found")]
    AuthorNotFound(i64),

    /// A random pick was requested from an empty store.
    #[error("No quotes available")]
    EmptyStore,

    /// A filter matched nothing.
    ///
    /// ## When This Occurs
    /// ```text
    /// GET /quotes/filter?author=nobody
    ///      │
    ///      ▼
    /// QuoteFilter { author: "nobody" } applied to every quote
    ///      │
    ///      ▼
    /// zero matches → NoMatchingQuotes → 404
    /// ```
    #[error("No quotes match the filter")]
    NoMatchingQuotes,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a request body or query string does not meet the
/// field rules. Used for early validation before any storage call.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a non-numeric rating in a query string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
