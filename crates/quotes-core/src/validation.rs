//! # Validation Module
//!
//! Field rules for quote and author input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── JSON shape, field types                                           │
//! │  └── Allow-list: unknown keys rejected (deny_unknown_fields)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required / length rules → ValidationError (400)                   │
//! │  └── Rating → silently defaulted (create) or dropped (update)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL, UNIQUE(name)                                            │
//! │  ├── CHECK (rating BETWEEN 1 AND 5)                                    │
//! │  └── FOREIGN KEY quotes.author_id → authors.id                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{AuthorRef, Rating};
use crate::MAX_AUTHOR_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an author name and returns it trimmed.
///
/// ## Rules
/// - Must not be blank
/// - At most 302 characters (counted as chars, not bytes)
///
/// ## Example
/// ```rust
/// use quotes_core::validation::validate_author_name;
///
/// assert_eq!(validate_author_name("  Rick Cook ").unwrap(), "Rick Cook");
/// assert!(validate_author_name("   ").is_err());
/// ```
pub fn validate_author_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "author".to_string(),
        });
    }

    if name.chars().count() > MAX_AUTHOR_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "author".to_string(),
            max: MAX_AUTHOR_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates quote text.
///
/// The text is stored exactly as submitted; only blank text is refused.
pub fn validate_quote_text(text: &str) -> ValidationResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "text".to_string(),
        });
    }

    Ok(())
}

/// Validates an author reference from a request body.
///
/// Names go through [`validate_author_name`]; ids must be positive.
pub fn validate_author_ref(author: AuthorRef) -> ValidationResult<AuthorRef> {
    match author {
        AuthorRef::Id(id) if id <= 0 => Err(ValidationError::MustBePositive {
            field: "author".to_string(),
        }),
        AuthorRef::Id(id) => Ok(AuthorRef::Id(id)),
        AuthorRef::Name(name) => validate_author_name(&name).map(AuthorRef::Name),
    }
}

// =============================================================================
// Rating Rules
// =============================================================================

/// Rating to store for a new quote.
///
/// ## Rules
/// ```text
/// ┌──────────────────────────────┬──────────────┐
/// │  Supplied rating             │  Stored      │
/// ├──────────────────────────────┼──────────────┤
/// │  absent / null               │  1           │
/// │  integer in 1..=5            │  as given    │
/// │  integer outside 1..=5       │  1           │
/// │  string, float, bool, ...    │  1           │
/// └──────────────────────────────┴──────────────┘
/// ```
pub fn rating_for_create(raw: Option<&Value>) -> Rating {
    raw.and_then(Rating::from_json).unwrap_or_default()
}

/// Rating change for an update: `None` keeps the stored rating.
///
/// A supplied-but-invalid rating is ignored rather than rejected.
pub fn rating_for_update(raw: Option<&Value>) -> Option<Rating> {
    raw.and_then(Rating::from_json)
}

/// Parses the `rating` query parameter of the filter endpoint.
///
/// Unlike bodies, a query value that is not an integer is an error.
pub fn parse_rating_param(raw: &str) -> ValidationResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "rating".to_string(),
            reason: "must be an integer".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
