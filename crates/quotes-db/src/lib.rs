//! # quotes-db: Persistence Layer for Quotebook
//!
//! This crate provides the two storage backends of the quote store behind
//! one pair of repository traits.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quotebook Data Flow                              │
//! │                                                                         │
//! │  axum handler (create_quote)                                           │
//! │       │                                                                 │
//! │       ▼  Arc<dyn QuoteRepository>                                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     quotes-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ MemoryQuote-  │    │   Database    │    │  Migrations  │  │   │
//! │  │   │ Store         │    │   (pool.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ BTreeMap      │    │ SqlitePool    │    │ 001_init.sql │  │   │
//! │  │   │ id → Quote    │    │ QuoteRepo     │    │ 002_rating   │  │   │
//! │  │   │               │    │ AuthorRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Repository traits and implementations
//! - [`seed`] - Sample quotes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quotes_db::{Database, DbConfig, QuoteRepository};
//!
//! let db = Database::new(DbConfig::new("quotes.db")).await?;
//! let quotes = db.quotes();
//! let all = quotes.list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::author::SqliteAuthorRepository;
pub use repository::memory::MemoryQuoteStore;
pub use repository::quote::SqliteQuoteRepository;
pub use repository::{AuthorRepository, QuoteRepository};
