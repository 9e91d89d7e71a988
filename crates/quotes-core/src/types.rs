//! # Domain Types
//!
//! Core domain types used throughout Quotebook.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Quote       │   │     Author      │   │     Rating      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  1..=5          │       │
//! │  │  author (name)  │◄──│  name (unique)  │   │  default 1      │       │
//! │  │  text           │   └─────────────────┘   └─────────────────┘       │
//! │  │  rating         │                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    NewQuote     │   │   QuotePatch    │   │   QuoteFilter   │       │
//! │  │  validated      │   │  partial update │   │  author substr  │       │
//! │  │  create input   │   │  (only Some     │   │  rating exact   │       │
//! │  │                 │   │   fields apply) │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Author Identity
//! In the relational backend a quote references an [`Author`] row; the
//! `author` field of [`Quote`] carries that author's name so both backends
//! produce the same JSON shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

// =============================================================================
// Rating
// =============================================================================

/// A quote rating in the range 1..=5.
///
/// Constructed only through [`Rating::new`], [`Rating::or_default`] or
/// `TryFrom<i64>`, so a `Rating` value is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(i64);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: i64 = 1;

    /// Highest accepted rating.
    pub const MAX: i64 = 5;

    /// Rating stored when none (or an invalid one) is supplied on create.
    pub const DEFAULT: Rating = Rating(1);

    /// Returns the rating if `value` is within 1..=5.
    pub fn new(value: i64) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Rating(value))
    }

    /// Returns the rating for `value`, or [`Rating::DEFAULT`] when absent or out of range.
    ///
    /// ## Example
    /// ```rust
    /// use quotes_core::Rating;
    ///
    /// assert_eq!(Rating::or_default(None).value(), 1);
    /// assert_eq!(Rating::or_default(Some(0)).value(), 1);
    /// assert_eq!(Rating::or_default(Some(3)).value(), 3);
    /// ```
    pub fn or_default(value: Option<i64>) -> Self {
        value.and_then(Rating::new).unwrap_or_default()
    }

    /// Interprets a raw JSON value as a rating.
    ///
    /// Only JSON integers in range qualify. Strings, floats, booleans and
    /// `null` yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        value.as_i64().and_then(Rating::new)
    }

    /// Returns the numeric value.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::DEFAULT
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: Rating::MIN,
            max: Rating::MAX,
        })
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A quote record, the primary resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Quote {
    /// Unique identifier, assigned by the store.
    pub id: i64,

    /// Author name (free text, or the referenced author's name).
    pub author: String,

    /// The quote itself.
    pub text: String,

    /// Rating in 1..=5.
    pub rating: Rating,
}

// =============================================================================
// Author
// =============================================================================

/// An author owning zero or more quotes (relational backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// How a create/update request names the author of a quote.
///
/// Deserialized untagged: a JSON number is an author id, a JSON string is
/// an author name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    /// Reference to an existing author row.
    Id(i64),
    /// Author name; the relational backend finds or creates the row.
    Name(String),
}

impl fmt::Display for AuthorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorRef::Id(id) => write!(f, "#{}", id),
            AuthorRef::Name(name) => f.write_str(name),
        }
    }
}

// =============================================================================
// Create / Update Inputs
// =============================================================================

/// Validated input for creating a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub author: AuthorRef,
    pub text: String,
    pub rating: Rating,
}

impl NewQuote {
    /// Creates a quote input with a free-text author.
    pub fn new(author: impl Into<String>, text: impl Into<String>, rating: Rating) -> Self {
        NewQuote {
            author: AuthorRef::Name(author.into()),
            text: text.into(),
            rating,
        }
    }
}

/// Validated partial update. Only `Some` fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotePatch {
    pub author: Option<AuthorRef>,
    pub text: Option<String>,
    pub rating: Option<Rating>,
}

impl QuotePatch {
    /// Returns true when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.text.is_none() && self.rating.is_none()
    }

    /// Applies the text and rating changes to `quote`.
    ///
    /// The author is left alone: resolving an [`AuthorRef`] is backend work.
    pub fn apply_fields(&self, quote: &mut Quote) {
        if let Some(text) = &self.text {
            quote.text = text.clone();
        }
        if let Some(rating) = self.rating {
            quote.rating = rating;
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Predicate set for `GET /quotes/filter`.
///
/// Every supplied predicate must hold. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFilter {
    /// Case-insensitive substring of the author name.
    pub author: Option<String>,
    /// Exact rating.
    pub rating: Option<i64>,
}

impl QuoteFilter {
    /// Returns true when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.rating.is_none()
    }

    /// Checks the author predicate alone.
    ///
    /// Uses Unicode lowercasing, so `"рик"` matches `"Рик Кук"` as well as
    /// `"rick"` matching `"Rick Cook"`.
    pub fn matches_author(&self, author: &str) -> bool {
        match &self.author {
            Some(needle) => author.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }

    /// Checks the rating predicate alone.
    pub fn matches_rating(&self, rating: Rating) -> bool {
        self.rating.map_or(true, |wanted| rating.value() == wanted)
    }

    /// Checks every predicate against `quote`.
    pub fn matches(&self, quote: &Quote) -> bool {
        self.matches_author(&quote.author) && self.matches_rating(quote.rating)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: i64, author: &str, rating: i64) -> Quote {
        Quote {
            id,
            author: author.to_string(),
            text: "text".to_string(),
            rating: Rating::new(rating).unwrap(),
        }
    }

    #[test]
    fn test_rating_range() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert!(Rating::new(-3).is_none());
        for value in 1..=5 {
            assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn test_rating_default_substitution() {
        assert_eq!(Rating::or_default(None), Rating::DEFAULT);
        assert_eq!(Rating::or_default(Some(0)), Rating::DEFAULT);
        assert_eq!(Rating::or_default(Some(6)), Rating::DEFAULT);
        assert_eq!(Rating::or_default(Some(5)).value(), 5);
    }

    #[test]
    fn test_rating_from_json() {
        assert_eq!(Rating::from_json(&serde_json::json!(4)).unwrap().value(), 4);
        assert!(Rating::from_json(&serde_json::json!(9)).is_none());
        assert!(Rating::from_json(&serde_json::json!("4")).is_none());
        assert!(Rating::from_json(&serde_json::json!(2.5)).is_none());
        assert!(Rating::from_json(&serde_json::Value::Null).is_none());
    }

    #[test]
    fn test_quote_json_shape() {
        let q = quote(7, "Ada", 1);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "author": "Ada", "text": "text", "rating": 1})
        );
    }

    #[test]
    fn test_quote_rejects_out_of_range_rating_on_deserialize() {
        let raw = r#"{"id": 1, "author": "Ada", "text": "x", "rating": 9}"#;
        assert!(serde_json::from_str::<Quote>(raw).is_err());
    }

    #[test]
    fn test_author_ref_untagged() {
        let by_id: AuthorRef = serde_json::from_str("3").unwrap();
        assert_eq!(by_id, AuthorRef::Id(3));

        let by_name: AuthorRef = serde_json::from_str("\"Rick Cook\"").unwrap();
        assert_eq!(by_name, AuthorRef::Name("Rick Cook".to_string()));
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let mut q = quote(1, "Ada", 2);
        let patch = QuotePatch {
            text: Some("new text".to_string()),
            ..QuotePatch::default()
        };
        patch.apply_fields(&mut q);

        assert_eq!(q.text, "new text");
        assert_eq!(q.rating.value(), 2);
        assert_eq!(q.author, "Ada");
        assert!(QuotePatch::default().is_empty());
    }

    #[test]
    fn test_filter_author_case_insensitive() {
        let filter = QuoteFilter {
            author: Some("rick".to_string()),
            rating: None,
        };
        assert!(filter.matches(&quote(3, "Rick Cook", 1)));
        assert!(!filter.matches(&quote(5, "Waldi Ravens", 1)));

        let cyrillic = QuoteFilter {
            author: Some("ВАДИМ".to_string()),
            rating: None,
        };
        assert!(cyrillic.matches(&quote(1, "Вадим Шиховцов", 1)));
    }

    #[test]
    fn test_filter_combines_predicates() {
        let filter = QuoteFilter {
            author: Some("cook".to_string()),
            rating: Some(3),
        };
        assert!(filter.matches(&quote(1, "Rick Cook", 3)));
        assert!(!filter.matches(&quote(2, "Rick Cook", 2)));
        assert!(!filter.matches(&quote(3, "Yoggi Berra", 3)));

        let empty = QuoteFilter::default();
        assert!(empty.is_empty());
        assert!(empty.matches(&quote(4, "Anyone", 5)));
    }
}
