//! # In-Memory Quote Store
//!
//! The list backend: quotes live in a map owned by the store object, and the
//! author of a quote is plain text.
//!
//! ## Id Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BTreeMap<i64, Quote>                                                   │
//! │                                                                         │
//! │   3 ─► Rick Cook          new id = last key + 1 = 9                    │
//! │   5 ─► Waldi Ravens       (1 when the map is empty)                    │
//! │   6 ─► Mosher's Law                                                     │
//! │   8 ─► Yoggi Berra        ids only grow, so key order == insert order  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use rand::seq::IteratorRandom;
use tokio::sync::RwLock;
use tracing::debug;

use quotes_core::{AuthorRef, NewQuote, Quote, QuoteFilter, QuotePatch};

use crate::error::{DbError, DbResult};
use crate::repository::QuoteRepository;

/// Quote store backed by an in-process map.
#[derive(Debug, Default)]
pub struct MemoryQuoteStore {
    quotes: RwLock<BTreeMap<i64, Quote>>,
}

impl MemoryQuoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `quotes`, keeping their ids.
    ///
    /// A later quote with a duplicate id replaces the earlier one.
    pub fn with_quotes(quotes: impl IntoIterator<Item = Quote>) -> Self {
        let map = quotes.into_iter().map(|q| (q.id, q)).collect();
        MemoryQuoteStore {
            quotes: RwLock::new(map),
        }
    }

    fn next_id(quotes: &BTreeMap<i64, Quote>) -> i64 {
        quotes.keys().next_back().map_or(1, |last| last + 1)
    }
}

/// The list backend only knows author names.
fn author_name(author: AuthorRef) -> DbResult<String> {
    match author {
        AuthorRef::Name(name) => Ok(name),
        AuthorRef::Id(id) => Err(DbError::ForeignKeyViolation {
            message: format!("author id {} cannot be resolved by the in-memory store", id),
        }),
    }
}

#[async_trait]
impl QuoteRepository for MemoryQuoteStore {
    async fn list(&self) -> DbResult<Vec<Quote>> {
        Ok(self.quotes.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Quote>> {
        Ok(self.quotes.read().await.get(&id).cloned())
    }

    async fn create(&self, new_quote: NewQuote) -> DbResult<Quote> {
        let author = author_name(new_quote.author)?;

        let mut quotes = self.quotes.write().await;
        let id = Self::next_id(&quotes);
        let quote = Quote {
            id,
            author,
            text: new_quote.text,
            rating: new_quote.rating,
        };

        debug!(id, author = %quote.author, "Creating quote in memory");
        quotes.insert(id, quote.clone());
        Ok(quote)
    }

    async fn update(&self, id: i64, patch: QuotePatch) -> DbResult<Quote> {
        let mut quotes = self.quotes.write().await;
        let quote = quotes
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("Quote", id))?;

        let author = patch.author.clone().map(author_name).transpose()?;

        debug!(id, "Updating quote in memory");
        if let Some(author) = author {
            quote.author = author;
        }
        patch.apply_fields(quote);
        Ok(quote.clone())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting quote from memory");
        self.quotes
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Quote", id))
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.quotes.read().await.len() as i64)
    }

    async fn random(&self) -> DbResult<Option<Quote>> {
        let quotes = self.quotes.read().await;
        Ok(quotes.values().choose(&mut rand::thread_rng()).cloned())
    }

    async fn filter(&self, filter: &QuoteFilter) -> DbResult<Vec<Quote>> {
        Ok(self
            .quotes
            .read()
            .await
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use quotes_core::Rating;

    fn rating(value: i64) -> Rating {
        Rating::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_allocates_next_id() {
        let store = MemoryQuoteStore::with_quotes(seed::sample_quotes());
        let created = store
            .create(NewQuote::new("Ada", "x", Rating::DEFAULT))
            .await
            .unwrap();

        assert_eq!(created.id, 9);
        assert_eq!(store.get_by_id(9).await.unwrap().unwrap(), created);
    }

    #[tokio::test]
    async fn test_first_id_in_empty_store() {
        let store = MemoryQuoteStore::new();
        let created = store
            .create(NewQuote::new("Ada", "x", rating(2)))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.rating.value(), 2);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryQuoteStore::with_quotes(seed::sample_quotes());
        store
            .create(NewQuote::new("Ada", "x", Rating::DEFAULT))
            .await
            .unwrap();

        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 5, 6, 8, 9]);
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let store = MemoryQuoteStore::new();
        let created = store
            .create(NewQuote::new("Ada", "x", rating(4)))
            .await
            .unwrap();

        let updated = store
            .update(
                created.id,
                QuotePatch {
                    text: Some("y".to_string()),
                    ..QuotePatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.text, "y");
        assert_eq!(updated.author, "Ada");
        assert_eq!(updated.rating.value(), 4);

        let renamed = store
            .update(
                created.id,
                QuotePatch {
                    author: Some(AuthorRef::Name("Grace".to_string())),
                    ..QuotePatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.author, "Grace");
        assert_eq!(renamed.text, "y");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let store = MemoryQuoteStore::new();
        assert!(matches!(
            store.update(42, QuotePatch::default()).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(42).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_id_with_author_id() {
        let store = MemoryQuoteStore::with_quotes(seed::sample_quotes());
        let patch = QuotePatch {
            author: Some(AuthorRef::Id(3)),
            ..QuotePatch::default()
        };
        assert!(matches!(
            store.update(42, patch.clone()).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            store.update(3, patch).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let store = MemoryQuoteStore::with_quotes(seed::sample_quotes());
        store.delete(5).await.unwrap();

        assert!(store.get_by_id(5).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_author_id_rejected() {
        let store = MemoryQuoteStore::new();
        let new_quote = NewQuote {
            author: AuthorRef::Id(1),
            text: "x".to_string(),
            rating: Rating::DEFAULT,
        };
        assert!(matches!(
            store.create(new_quote).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_random() {
        let empty = MemoryQuoteStore::new();
        assert!(empty.random().await.unwrap().is_none());

        let store = MemoryQuoteStore::with_quotes(seed::sample_quotes());
        let picked = store.random().await.unwrap().unwrap();
        assert!([3, 5, 6, 8].contains(&picked.id));
    }

    #[tokio::test]
    async fn test_filter() {
        let store = MemoryQuoteStore::with_quotes(seed::sample_quotes());
        store
            .create(NewQuote::new("Rick Cook", "second", rating(3)))
            .await
            .unwrap();

        let all = store.filter(&QuoteFilter::default()).await.unwrap();
        assert_eq!(all.len(), 5);

        let by_author = store
            .filter(&QuoteFilter {
                author: Some("rick".to_string()),
                rating: None,
            })
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);

        let by_rating = store
            .filter(&QuoteFilter {
                author: None,
                rating: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(by_rating.len(), 1);
        assert_eq!(by_rating[0].text, "second");
    }
}
