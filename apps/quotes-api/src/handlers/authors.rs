//! # Author Handlers
//!
//! `/authors` endpoints, mounted only when the SQLite backend is active.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use quotes_core::{Author, AuthorPayload, AuthorQuotePayload, CoreError, Quote};

use crate::error::{ApiResult, MessageBody};
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

/// `GET /authors`
pub async fn list_authors(State(state): State<AppState>) -> ApiResult<Json<Vec<Author>>> {
    let authors = state.authors()?.list().await?;
    Ok(Json(authors))
}

/// `GET /authors/{id}`
pub async fn get_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Author>> {
    let author = state
        .authors()?
        .get_by_id(id)
        .await?
        .ok_or(CoreError::AuthorNotFound(id))?;
    Ok(Json(author))
}

/// `POST /authors`
pub async fn create_author(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AuthorPayload>,
) -> ApiResult<(StatusCode, Json<Author>)> {
    let name = payload.into_name()?;
    let author = state.authors()?.create(&name).await?;

    info!(id = author.id, name = %author.name, "Author created");
    Ok((StatusCode::CREATED, Json(author)))
}

/// `PUT /authors/{id}`
pub async fn update_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AuthorPayload>,
) -> ApiResult<Json<Author>> {
    let name = payload.into_name()?;
    let author = state.authors()?.rename(id, &name).await?;
    Ok(Json(author))
}

/// `DELETE /authors/{id}`
///
/// Removes the author's quotes as well.
pub async fn delete_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageBody>> {
    let removed = state.authors()?.delete(id).await?;

    info!(id, quotes_removed = removed, "Author deleted");
    Ok(Json(MessageBody {
        message: format!(
            "Author with id={} is deleted along with {} quote(s).",
            id, removed
        ),
    }))
}

/// `GET /authors/{id}/quotes`
pub async fn list_author_quotes(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Quote>>> {
    let quotes = state.authors()?.quotes(id).await?;
    Ok(Json(quotes))
}

/// `POST /authors/{id}/quotes`
pub async fn create_author_quote(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AuthorQuotePayload>,
) -> ApiResult<(StatusCode, Json<Quote>)> {
    state.authors()?;
    let new_quote = payload.into_new_quote(id)?;
    let quote = state.quotes.create(new_quote).await?;

    info!(id = quote.id, author_id = id, "Quote created for author");
    Ok((StatusCode::CREATED, Json(quote)))
}
