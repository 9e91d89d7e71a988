//! HTTP handlers.

pub mod authors;
pub mod quotes;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::ApiError;
use crate::AppState;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match &state.db {
        Some(db) if !db.health_check().await => {
            (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
        }
        _ => (StatusCode::OK, "OK"),
    }
}

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Resource not found")
}

/// Fallback for a known path with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Reads a response body as JSON.
#[cfg(test)]
pub(crate) async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
