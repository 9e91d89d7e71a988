//! # Sample Quotes
//!
//! The starter collection served by the in-memory backend and loaded into
//! an empty SQLite database by the `seed` binary or `QUOTES_SEED=true`.

use tracing::info;

use quotes_core::{NewQuote, Quote, Rating};

use crate::error::DbResult;
use crate::repository::QuoteRepository;

/// `(id, author, text)` of each sample quote. Every sample is rated 1.
const SAMPLE_QUOTES: &[(i64, &str, &str)] = &[
    (
        3,
        "Rick Cook",
        "Programming today is a race between software engineers striving to build bigger \
         and better idiot-proof programs, and the Universe trying to produce bigger and \
         better idiots. So far, the Universe is winning.",
    ),
    (
        5,
        "Waldi Ravens",
        "Programming in C is like a fast dance on a newly waxed dance floor by people \
         carrying razors.",
    ),
    (
        6,
        "Mosher's Law of Software Engineering",
        "Don't worry if it doesn't work right. If everything did, you'd be out of a job.",
    ),
    (
        8,
        "Yoggi Berra",
        "In theory, there is no difference between theory and practice. In practice, there is.",
    ),
];

/// The sample quotes with their fixed ids.
pub fn sample_quotes() -> Vec<Quote> {
    SAMPLE_QUOTES
        .iter()
        .map(|&(id, author, text)| Quote {
            id,
            author: author.to_string(),
            text: text.to_string(),
            rating: Rating::DEFAULT,
        })
        .collect()
}

/// Inserts the sample quotes when `repo` holds no quotes.
///
/// Ids are allocated by the store. Returns how many quotes were inserted
/// (0 when the store already had data).
pub async fn seed_if_empty(repo: &dyn QuoteRepository) -> DbResult<usize> {
    let existing = repo.count().await?;
    if existing > 0 {
        info!(existing, "Store already has quotes, skipping seed");
        return Ok(0);
    }

    for quote in sample_quotes() {
        repo.create(NewQuote::new(quote.author, quote.text, quote.rating))
            .await?;
    }

    info!(count = SAMPLE_QUOTES.len(), "Seeded sample quotes");
    Ok(SAMPLE_QUOTES.len())
}
