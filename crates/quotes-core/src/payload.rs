//! # Request Payloads
//!
//! Allow-listed shapes for everything a client may send. Each payload lists
//! the fields it accepts and rejects any other key (`deny_unknown_fields`),
//! then converts into a validated domain input.
//!
//! ```text
//! QuotePayload ──into_new_quote()──► NewQuote      (POST /quotes)
//!              ──into_patch()──────► QuotePatch    (PUT /quotes/{id})
//! AuthorQuotePayload ──────────────► NewQuote      (POST /authors/{id}/quotes)
//! AuthorPayload ──into_name()──────► String        (POST/PUT /authors)
//! FilterQuery ──into_filter()──────► QuoteFilter   (GET /quotes/filter)
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{AuthorRef, NewQuote, QuoteFilter, QuotePatch};
use crate::validation::{
    parse_rating_param, rating_for_create, rating_for_update, validate_author_name,
    validate_author_ref, validate_quote_text, ValidationResult,
};

/// Body of `POST /quotes` and `PUT /quotes/{id}`.
///
/// `rating` is kept as raw JSON so that a wrong type (e.g. `"5"`) is treated
/// like any other invalid rating instead of failing the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotePayload {
    pub author: Option<AuthorRef>,
    pub text: Option<String>,
    pub rating: Option<Value>,
}

impl QuotePayload {
    /// Validates the payload as a create request.
    ///
    /// `author` and `text` are required; `rating` falls back to 1.
    pub fn into_new_quote(self) -> ValidationResult<NewQuote> {
        let author = self.author.ok_or_else(|| required("author"))?;
        let author = validate_author_ref(author)?;

        let text = self.text.ok_or_else(|| required("text"))?;
        validate_quote_text(&text)?;

        Ok(NewQuote {
            author,
            text,
            rating: rating_for_create(self.rating.as_ref()),
        })
    }

    /// Validates the payload as a partial update.
    ///
    /// Supplied `author`/`text` must still be valid; an invalid `rating` is
    /// dropped from the patch.
    pub fn into_patch(self) -> ValidationResult<QuotePatch> {
        let author = self.author.map(validate_author_ref).transpose()?;

        if let Some(text) = &self.text {
            validate_quote_text(text)?;
        }

        Ok(QuotePatch {
            author,
            text: self.text,
            rating: rating_for_update(self.rating.as_ref()),
        })
    }
}

/// Body of `POST /authors/{id}/quotes`; the author comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorQuotePayload {
    pub text: Option<String>,
    pub rating: Option<Value>,
}

impl AuthorQuotePayload {
    /// Validates the payload as a quote owned by `author_id`.
    pub fn into_new_quote(self, author_id: i64) -> ValidationResult<NewQuote> {
        let text = self.text.ok_or_else(|| required("text"))?;
        validate_quote_text(&text)?;

        Ok(NewQuote {
            author: AuthorRef::Id(author_id),
            text,
            rating: rating_for_create(self.rating.as_ref()),
        })
    }
}

/// Body of `POST /authors` and `PUT /authors/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorPayload {
    pub name: Option<String>,
}

impl AuthorPayload {
    /// Returns the validated, trimmed author name.
    pub fn into_name(self) -> ValidationResult<String> {
        let name = self.name.ok_or_else(|| required("name"))?;
        validate_author_name(&name).map_err(|err| match err {
            ValidationError::Required { .. } => required("name"),
            ValidationError::TooLong { max, .. } => ValidationError::TooLong {
                field: "name".to_string(),
                max,
            },
            other => other,
        })
    }
}

/// Query string of `GET /quotes/filter`.
///
/// Only `author` and `rating` are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterQuery {
    pub author: Option<String>,
    pub rating: Option<String>,
}

impl FilterQuery {
    /// Converts the query into a filter. Blank values count as absent.
    pub fn into_filter(self) -> ValidationResult<QuoteFilter> {
        let author = self
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let rating = match self.rating.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_rating_param(raw)?),
            _ => None,
        };

        Ok(QuoteFilter { author, rating })
    }
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(raw: &str) -> QuotePayload {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_create_clamps_invalid_rating() {
        let new = payload(r#"{"author": "Ada", "text": "x", "rating": 9}"#)
            .into_new_quote()
            .unwrap();
        assert_eq!(new.author, AuthorRef::Name("Ada".to_string()));
        assert_eq!(new.text, "x");
        assert_eq!(new.rating.value(), 1);

        let new = payload(r#"{"author": "Ada", "text": "x"}"#)
            .into_new_quote()
            .unwrap();
        assert_eq!(new.rating.value(), 1);

        let new = payload(r#"{"author": "Ada", "text": "x", "rating": 4}"#)
            .into_new_quote()
            .unwrap();
        assert_eq!(new.rating.value(), 4);
    }

    #[test]
    fn test_create_requires_author_and_text() {
        let err = payload(r#"{"text": "x"}"#).into_new_quote().unwrap_err();
        assert_eq!(err.to_string(), "author is required");

        let err = payload(r#"{"author": "Ada"}"#).into_new_quote().unwrap_err();
        assert_eq!(err.to_string(), "text is required");
    }

    #[test]
    fn test_create_accepts_author_id() {
        let new = payload(r#"{"author": 2, "text": "x"}"#)
            .into_new_quote()
            .unwrap();
        assert_eq!(new.author, AuthorRef::Id(2));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = serde_json::from_str::<QuotePayload>(
            r#"{"author": "Ada", "text": "x", "id": 99}"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<AuthorPayload>(r#"{"name": "Ada", "x": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_drops_invalid_rating() {
        let patch = payload(r#"{"rating": 9}"#).into_patch().unwrap();
        assert!(patch.is_empty());

        let patch = payload(r#"{"rating": 2, "text": "y"}"#).into_patch().unwrap();
        assert_eq!(patch.rating.unwrap().value(), 2);
        assert_eq!(patch.text.as_deref(), Some("y"));
        assert!(patch.author.is_none());
    }

    #[test]
    fn test_patch_rejects_blank_text() {
        assert!(payload(r#"{"text": "  "}"#).into_patch().is_err());
    }

    #[test]
    fn test_author_quote_payload() {
        let raw: AuthorQuotePayload =
            serde_json::from_str(r#"{"text": "x", "rating": 0}"#).unwrap();
        let new = raw.into_new_quote(5).unwrap();
        assert_eq!(new.author, AuthorRef::Id(5));
        assert_eq!(new.rating.value(), 1);
    }

    #[test]
    fn test_author_payload_name() {
        let raw: AuthorPayload = serde_json::from_str(r#"{"name": " Ada "}"#).unwrap();
        assert_eq!(raw.into_name().unwrap(), "Ada");

        let err = AuthorPayload::default().into_name().unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_filter_query() {
        let filter = FilterQuery {
            author: Some("rick".to_string()),
            rating: Some("3".to_string()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.author.as_deref(), Some("rick"));
        assert_eq!(filter.rating, Some(3));

        let empty = FilterQuery {
            author: Some("  ".to_string()),
            rating: Some("".to_string()),
        }
        .into_filter()
        .unwrap();
        assert!(empty.is_empty());

        let bad = FilterQuery {
            author: None,
            rating: Some("high".to_string()),
        };
        assert!(bad.into_filter().is_err());
    }
}
