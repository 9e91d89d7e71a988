//! # Quote Handlers
//!
//! `/quotes` endpoints. Both backends sit behind `state.quotes`, so the same
//! handlers serve the memory and the SQLite store.
//!
//! ## Request Flow
//! ```text
//! POST /quotes {"author": "Ada", "text": "x", "rating": 9}
//!      │
//!      ▼
//! ApiJson<QuotePayload>     unknown keys → 400
//!      │
//!      ▼
//! into_new_quote()          author/text required, rating 9 → 1
//!      │
//!      ▼
//! state.quotes.create()     id allocated by the store
//!      │
//!      ▼
//! 201 {"id": N, "author": "Ada", "text": "x", "rating": 1}
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use quotes_core::{CoreError, FilterQuery, Quote, QuotePayload};

use crate::error::{ApiResult, MessageBody};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

/// Body of `GET /quotes/count`.
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// `GET /quotes`
pub async fn list_quotes(State(state): State<AppState>) -> ApiResult<Json<Vec<Quote>>> {
    let quotes = state.quotes.list().await?;
    Ok(Json(quotes))
}

/// `GET /quotes/{id}`
pub async fn get_quote(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Quote>> {
    let quote = state
        .quotes
        .get_by_id(id)
        .await?
        .ok_or(CoreError::QuoteNotFound(id))?;
    Ok(Json(quote))
}

/// `POST /quotes`
pub async fn create_quote(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<QuotePayload>,
) -> ApiResult<(StatusCode, Json<Quote>)> {
    let new_quote = payload.into_new_quote()?;
    let quote = state.quotes.create(new_quote).await?;

    info!(id = quote.id, author = %quote.author, "Quote created");
    Ok((StatusCode::CREATED, Json(quote)))
}

/// `PUT /quotes/{id}`
///
/// Only the supplied fields change; an invalid rating is dropped.
pub async fn update_quote(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<QuotePayload>,
) -> ApiResult<Json<Quote>> {
    let patch = payload.into_patch()?;
    debug!(id, empty = patch.is_empty(), "Updating quote");

    let quote = state.quotes.update(id, patch).await?;
    Ok(Json(quote))
}

/// `DELETE /quotes/{id}`
pub async fn delete_quote(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageBody>> {
    state.quotes.delete(id).await?;

    info!(id, "Quote deleted");
    Ok(Json(MessageBody {
        message: format!("Quote with id={} is deleted.", id),
    }))
}

/// `GET /quotes/count`
pub async fn count_quotes(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.quotes.count().await?;
    Ok(Json(CountResponse { count }))
}

/// `GET /quotes/random`
pub async fn random_quote(State(state): State<AppState>) -> ApiResult<Json<Quote>> {
    let quote = state.quotes.random().await?.ok_or(CoreError::EmptyStore)?;
    Ok(Json(quote))
}

/// `GET /quotes/filter?author=&rating=`
pub async fn filter_quotes(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FilterQuery>,
) -> ApiResult<Json<Vec<Quote>>> {
    let filter = query.into_filter()?;
    let quotes = state.quotes.filter(&filter).await?;

    if quotes.is_empty() {
        return Err(CoreError::NoMatchingQuotes.into());
    }
    Ok(Json(quotes))
}
