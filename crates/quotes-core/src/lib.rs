//! # quotes-core: Pure Domain Logic for Quotebook
//!
//! This crate holds the quote/author resource model and the rules that every
//! storage backend shares. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quotebook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP client (curl, frontend)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    quotes-api (axum handlers)                   │   │
//! │  │    list_quotes, create_quote, filter_quotes, create_author ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quotes-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  payload  │  │ validation│                  │   │
//! │  │   │  Quote    │  │ QuotePay- │  │  rating   │                  │   │
//! │  │   │  Author   │  │  load ... │  │  names    │                  │   │
//! │  │   │  Rating   │  │           │  │  text     │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    quotes-db (Persistence Layer)                │   │
//! │  │          in-memory store, SQLite repositories, migrations       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Quote, Author, Rating, QuoteFilter, ...)
//! - [`payload`] - Allow-listed request bodies and query strings
//! - [`validation`] - Field rules and rating substitution
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use quotes_core::Rating;
//!
//! // Out-of-range ratings fall back to the default instead of failing
//! assert_eq!(Rating::or_default(Some(9)).value(), 1);
//! assert_eq!(Rating::or_default(Some(4)).value(), 4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod payload;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use payload::{AuthorPayload, AuthorQuotePayload, FilterQuery, QuotePayload};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an author name, in characters.
///
/// Matches the `VARCHAR(302)` column the authors table was first created with.
pub const MAX_AUTHOR_NAME_LEN: usize = 302;
