//! # Quote Repository
//!
//! SQLite-backed quote storage. Every quote references an author row; the
//! `author` field of the returned [`Quote`] is that author's name.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create(NewQuote)                                     │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │   ├── AuthorRef::Name ─► INSERT authors ... ON CONFLICT DO NOTHING     │
//! │   │                      SELECT id FROM authors WHERE name = ?         │
//! │   ├── AuthorRef::Id   ─► must exist, else NotFound                     │
//! │   ├── INSERT INTO quotes (author_id, text, rating)                     │
//! │   └── SELECT the joined row back                                       │
//! │  COMMIT ─── failure ─► DbError::TransactionFailed                      │
//! │                                                                         │
//! │  Any earlier `?` drops the transaction, which rolls it back.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use quotes_core::{AuthorRef, NewQuote, Quote, QuoteFilter, QuotePatch};

use crate::error::{DbError, DbResult};
use crate::repository::QuoteRepository;

/// Repository for quote database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.quotes();
///
/// let quote = repo.create(NewQuote::new("Rick Cook", "...", Rating::DEFAULT)).await?;
/// let same = repo.get_by_id(quote.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteQuoteRepository {
    pool: SqlitePool,
}

impl SqliteQuoteRepository {
    /// Creates a new SqliteQuoteRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteQuoteRepository { pool }
    }
}

/// Loads one quote joined with its author name.
async fn fetch_quote(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Quote>> {
    let quote = sqlx::query_as::<_, Quote>(
        r#"
        SELECT q.id, a.name AS author, q.text, q.rating
        FROM quotes q
        INNER JOIN authors a ON a.id = q.author_id
        WHERE q.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(quote)
}

/// Turns an author reference into an author row id.
///
/// Names are find-or-create; ids must already exist.
async fn resolve_author(conn: &mut SqliteConnection, author: &AuthorRef) -> DbResult<i64> {
    match author {
        AuthorRef::Id(id) => {
            let id = *id;
            let found: Option<i64> = sqlx::query_scalar("SELECT id FROM authors WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
            found.ok_or_else(|| DbError::not_found("Author", id))
        }
        AuthorRef::Name(name) => {
            sqlx::query("INSERT INTO authors (name) VALUES (?1) ON CONFLICT(name) DO NOTHING")
                .bind(name.as_str())
                .execute(&mut *conn)
                .await?;

            let id: i64 = sqlx::query_scalar("SELECT id FROM authors WHERE name = ?1")
                .bind(name.as_str())
                .fetch_one(&mut *conn)
                .await?;
            Ok(id)
        }
    }
}

/// Inserts a quote for an already resolved author and reads it back.
async fn insert_quote(conn: &mut SqliteConnection, author_id: i64, new_quote: &NewQuote) -> DbResult<Quote> {
    let id = sqlx::query("INSERT INTO quotes (author_id, text, rating) VALUES (?1, ?2, ?3)")
        .bind(author_id)
        .bind(new_quote.text.as_str())
        .bind(new_quote.rating)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    fetch_quote(conn, id)
        .await?
        .ok_or_else(|| DbError::Internal(format!("quote {} vanished after insert", id)))
}

#[async_trait]
impl QuoteRepository for SqliteQuoteRepository {
    async fn list(&self) -> DbResult<Vec<Quote>> {
        let quotes = sqlx::query_as::<_, Quote>(
            r#"
            SELECT q.id, a.name AS author, q.text, q.rating
            FROM quotes q
            INNER JOIN authors a ON a.id = q.author_id
            ORDER BY q.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = quotes.len(), "Listed quotes");
        Ok(quotes)
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Quote>> {
        let mut conn = self.pool.acquire().await?;
        fetch_quote(&mut conn, id).await
    }

    async fn create(&self, new_quote: NewQuote) -> DbResult<Quote> {
        debug!(author = %new_quote.author, rating = %new_quote.rating, "Creating quote");

        let mut tx = self.pool.begin().await?;
        let author_id = resolve_author(&mut tx, &new_quote.author).await?;
        let quote = insert_quote(&mut tx, author_id, &new_quote).await?;
        tx.commit().await.map_err(DbError::commit)?;

        debug!(id = quote.id, "Quote created");
        Ok(quote)
    }

    async fn update(&self, id: i64, patch: QuotePatch) -> DbResult<Quote> {
        debug!(id, "Updating quote");

        let mut tx = self.pool.begin().await?;

        let current_author: Option<i64> =
            sqlx::query_scalar("SELECT author_id FROM quotes WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let current_author = current_author.ok_or_else(|| DbError::not_found("Quote", id))?;

        let author_id = match &patch.author {
            Some(author) => resolve_author(&mut tx, author).await?,
            None => current_author,
        };

        sqlx::query(
            r#"
            UPDATE quotes SET
                author_id = ?1,
                text = COALESCE(?2, text),
                rating = COALESCE(?3, rating)
            WHERE id = ?4
            "#,
        )
        .bind(author_id)
        .bind(patch.text.as_deref())
        .bind(patch.rating)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let quote = fetch_quote(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Quote", id))?;
        tx.commit().await.map_err(DbError::commit)?;

        Ok(quote)
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting quote");

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Quote", id));
        }

        tx.commit().await.map_err(DbError::commit)?;
        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn random(&self) -> DbResult<Option<Quote>> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            SELECT q.id, a.name AS author, q.text, q.rating
            FROM quotes q
            INNER JOIN authors a ON a.id = q.author_id
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }

    async fn filter(&self, filter: &QuoteFilter) -> DbResult<Vec<Quote>> {
        // SQLite's LOWER() only folds ASCII, so the author predicate runs here.
        let mut quotes = sqlx::query_as::<_, Quote>(
            r#"
            SELECT q.id, a.name AS author, q.text, q.rating
            FROM quotes q
            INNER JOIN authors a ON a.id = q.author_id
            WHERE (?1 IS NULL OR q.rating = ?1)
            ORDER BY q.id
            "#,
        )
        .bind(filter.rating)
        .fetch_all(&self.pool)
        .await?;

        quotes.retain(|q| filter.matches_author(&q.author));

        debug!(
            author = ?filter.author,
            rating = ?filter.rating,
            count = quotes.len(),
            "Filtered quotes"
        );
        Ok(quotes)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
