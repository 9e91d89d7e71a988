//! # Author Repository
//!
//! Database operations for authors.
//!
//! ## Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DELETE FROM authors WHERE id = 1                                       │
//! │       │                                                                 │
//! │       ▼  quotes.author_id REFERENCES authors(id) ON DELETE CASCADE      │
//! │  every quote with author_id = 1 is removed in the same statement       │
//! │                                                                         │
//! │  Requires PRAGMA foreign_keys = ON (set on every pooled connection).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use quotes_core::{Author, Quote};

use crate::error::{DbError, DbResult};
use crate::repository::AuthorRepository;

/// Repository for author database operations.
#[derive(Debug, Clone)]
pub struct SqliteAuthorRepository {
    pool: SqlitePool,
}

impl SqliteAuthorRepository {
    /// Creates a new SqliteAuthorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteAuthorRepository { pool }
    }
}

/// Reports a UNIQUE failure on `authors.name` with the offending name.
fn name_conflict(err: sqlx::Error, name: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { .. } => DbError::duplicate("name", name),
        other => other,
    }
}

#[async_trait]
impl AuthorRepository for SqliteAuthorRepository {
    async fn list(&self) -> DbResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>("SELECT id, name FROM authors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("SELECT id, name FROM authors WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    async fn create(&self, name: &str) -> DbResult<Author> {
        debug!(name = %name, "Creating author");

        let mut tx = self.pool.begin().await?;
        let id = sqlx::query("INSERT INTO authors (name) VALUES (?1)")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| name_conflict(e, name))?
            .last_insert_rowid();
        tx.commit().await.map_err(DbError::commit)?;

        Ok(Author {
            id,
            name: name.to_string(),
        })
    }

    async fn rename(&self, id: i64, name: &str) -> DbResult<Author> {
        debug!(id, name = %name, "Renaming author");

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE authors SET name = ?1 WHERE id = ?2")
            .bind(name)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| name_conflict(e, name))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Author", id));
        }
        tx.commit().await.map_err(DbError::commit)?;

        Ok(Author {
            id,
            name: name.to_string(),
        })
    }

    async fn delete(&self, id: i64) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;

        let owned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes WHERE author_id = ?1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM authors WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Author", id));
        }
        tx.commit().await.map_err(DbError::commit)?;

        debug!(id, quotes_removed = owned, "Author deleted");
        Ok(owned as u64)
    }

    async fn quotes(&self, id: i64) -> DbResult<Vec<Quote>> {
        if self.get_by_id(id).await?.is_none() {
            return Err(DbError::not_found("Author", id));
        }

        let quotes = sqlx::query_as::<_, Quote>(
            r#"
            SELECT q.id, a.name AS author, q.text, q.rating
            FROM quotes q
            INNER JOIN authors a ON a.id = q.author_id
            WHERE q.author_id = ?1
            ORDER BY q.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::QuoteRepository;
    use quotes_core::{AuthorRef, NewQuote, Rating};

    #[tokio::test]
    async fn test_create_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let authors = db.authors();

        let ada = authors.create("Ada").await.unwrap();
        let grace = authors.create("Grace").await.unwrap();

        let listed = authors.list().await.unwrap();
        assert_eq!(listed, vec![ada.clone(), grace]);
        assert_eq!(authors.get_by_id(ada.id).await.unwrap(), Some(ada));
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let authors = db.authors();
        authors.create("Ada").await.unwrap();

        match authors.create("Ada").await {
            Err(DbError::UniqueViolation { field, value }) => {
                assert_eq!(field, "name");
                assert_eq!(value, "Ada");
            }
            other => panic!("expected UniqueViolation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rename() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let authors = db.authors();
        let ada = authors.create("Ada").await.unwrap();
        authors.create("Grace").await.unwrap();

        let renamed = authors.rename(ada.id, "Ada Lovelace").await.unwrap();
        assert_eq!(renamed.name, "Ada Lovelace");

        assert!(matches!(
            authors.rename(ada.id, "Grace").await,
            Err(DbError::UniqueViolation { .. })
        ));
        assert!(matches!(
            authors.rename(99, "Nobody").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_quotes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let authors = db.authors();
        let quotes = db.quotes();

        let ada = authors.create("Ada").await.unwrap();
        for text in ["one", "two"] {
            quotes
                .create(NewQuote {
                    author: AuthorRef::Id(ada.id),
                    text: text.to_string(),
                    rating: Rating::DEFAULT,
                })
                .await
                .unwrap();
        }
        let kept = quotes
            .create(NewQuote::new("Grace", "three", Rating::DEFAULT))
            .await
            .unwrap();

        assert_eq!(authors.quotes(ada.id).await.unwrap().len(), 2);
        assert_eq!(authors.delete(ada.id).await.unwrap(), 2);

        assert_eq!(quotes.count().await.unwrap(), 1);
        assert_eq!(quotes.list().await.unwrap(), vec![kept]);
        assert!(authors.get_by_id(ada.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_author() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let authors = db.authors();

        assert!(matches!(
            authors.delete(5).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            authors.quotes(5).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
