//! # Repository Module
//!
//! Repository traits for the quote store and their implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Contract, Two Backends                           │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  state.quotes.create(new_quote)                                 │
//! │       ▼                                                                 │
//! │  dyn QuoteRepository                                                   │
//! │  ├── list / get_by_id / count / random / filter                        │
//! │  └── create / update / delete                                          │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  MemoryQuoteStore                  SqliteQuoteRepository               │
//! │  (BTreeMap + RwLock)               (SqlitePool, one tx per write)      │
//! │                                                                         │
//! │  dyn AuthorRepository ──────────► SqliteAuthorRepository only          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MemoryQuoteStore`](memory::MemoryQuoteStore) - quotes with free-text authors
//! - [`SqliteQuoteRepository`](quote::SqliteQuoteRepository) - quotes referencing author rows
//! - [`SqliteAuthorRepository`](author::SqliteAuthorRepository) - author CRUD with cascade

pub mod author;
pub mod memory;
pub mod quote;

use async_trait::async_trait;
use quotes_core::{Author, NewQuote, Quote, QuoteFilter, QuotePatch};

use crate::error::DbResult;

/// Storage contract for quotes.
///
/// Lookups that may legitimately miss return `Option`; mutations of a missing
/// id fail with [`DbError::NotFound`](crate::DbError::NotFound).
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// All quotes in id order.
    async fn list(&self) -> DbResult<Vec<Quote>>;

    /// The quote with `id`, if any.
    async fn get_by_id(&self, id: i64) -> DbResult<Option<Quote>>;

    /// Stores a new quote under a freshly allocated id.
    async fn create(&self, new_quote: NewQuote) -> DbResult<Quote>;

    /// Applies a partial update and returns the resulting record.
    async fn update(&self, id: i64, patch: QuotePatch) -> DbResult<Quote>;

    /// Removes the quote with `id`.
    async fn delete(&self, id: i64) -> DbResult<()>;

    /// Number of stored quotes.
    async fn count(&self) -> DbResult<i64>;

    /// One uniformly chosen quote, or `None` when the store is empty.
    async fn random(&self) -> DbResult<Option<Quote>>;

    /// Quotes satisfying every predicate of `filter`, in id order.
    async fn filter(&self, filter: &QuoteFilter) -> DbResult<Vec<Quote>>;
}

/// Storage contract for authors (relational backend).
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// All authors in id order.
    async fn list(&self) -> DbResult<Vec<Author>>;

    /// The author with `id`, if any.
    async fn get_by_id(&self, id: i64) -> DbResult<Option<Author>>;

    /// Creates an author; the name must be unused.
    async fn create(&self, name: &str) -> DbResult<Author>;

    /// Renames an author.
    async fn rename(&self, id: i64, name: &str) -> DbResult<Author>;

    /// Deletes an author together with all of its quotes.
    ///
    /// Returns the number of quotes removed by the cascade.
    async fn delete(&self, id: i64) -> DbResult<u64>;

    /// Quotes owned by the author, in id order.
    async fn quotes(&self, id: i64) -> DbResult<Vec<Quote>>;
}
