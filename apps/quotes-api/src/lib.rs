//! # quotes-api: HTTP Server for Quotebook
//!
//! Router, shared state and handlers. `main.rs` only wires configuration,
//! logging and shutdown around [`router`].
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /health                 OK when the store is reachable         │
//! │                                                                         │
//! │  GET    /quotes                 list                                   │
//! │  POST   /quotes                 create (201)                           │
//! │  GET    /quotes/count           {"count": N}                           │
//! │  GET    /quotes/random          one quote                              │
//! │  GET    /quotes/filter          ?author=&rating=                       │
//! │  GET    /quotes/{id}            one quote                              │
//! │  PUT    /quotes/{id}            partial update                         │
//! │  DELETE /quotes/{id}            {"message": ...}                       │
//! │                                                                         │
//! │  sqlite backend only:                                                  │
//! │  GET/POST        /authors                                              │
//! │  GET/PUT/DELETE  /authors/{id}                                         │
//! │  GET/POST        /authors/{id}/quotes                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use quotes_db::{AuthorRepository, Database, MemoryQuoteStore, QuoteRepository};

use crate::error::ApiError;
use crate::handlers::{authors, quotes};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Quote store, whichever backend is active
    pub quotes: Arc<dyn QuoteRepository>,

    /// Author store; `None` on the memory backend
    pub authors: Option<Arc<dyn AuthorRepository>>,

    /// Database handle for health checks; `None` on the memory backend
    pub db: Option<Database>,
}

impl AppState {
    /// State for the in-memory backend.
    pub fn memory(store: MemoryQuoteStore) -> Self {
        AppState {
            quotes: Arc::new(store),
            authors: None,
            db: None,
        }
    }

    /// State for the SQLite backend.
    pub fn sqlite(db: Database) -> Self {
        AppState {
            quotes: Arc::new(db.quotes()),
            authors: Some(Arc::new(db.authors())),
            db: Some(db),
        }
    }

    /// The author store, or 404 when the backend has none.
    pub fn authors(&self) -> Result<&Arc<dyn AuthorRepository>, ApiError> {
        self.authors
            .as_ref()
            .ok_or_else(|| ApiError::not_found("Authors are not available on this backend"))
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .route("/quotes", get(quotes::list_quotes).post(quotes::create_quote))
        .route("/quotes/count", get(quotes::count_quotes))
        .route("/quotes/random", get(quotes::random_quote))
        .route("/quotes/filter", get(quotes::filter_quotes))
        .route(
            "/quotes/{id}",
            get(quotes::get_quote)
                .put(quotes::update_quote)
                .delete(quotes::delete_quote),
        );

    if state.authors.is_some() {
        app = app
            .route("/authors", get(authors::list_authors).post(authors::create_author))
            .route(
                "/authors/{id}",
                get(authors::get_author)
                    .put(authors::update_author)
                    .delete(authors::delete_author),
            )
            .route(
                "/authors/{id}/quotes",
                get(authors::list_author_quotes).post(authors::create_author_quote),
            );
    }

    app.fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotes_db::{seed, DbConfig};
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    async fn serve(state: AppState) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        addr
    }

    /// Sends one HTTP/1.1 request and returns the status and raw body.
    async fn send(addr: SocketAddr, method: &str, path: &str, body: &str) -> (u16, String) {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "{} {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
             Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            method,
            path,
            body.len(),
            body
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
        (status, body.to_string())
    }

    async fn send_json(addr: SocketAddr, method: &str, path: &str, body: &str) -> (u16, Value) {
        let (status, body) = send(addr, method, path, body).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    fn memory_state() -> AppState {
        AppState::memory(MemoryQuoteStore::with_quotes(seed::sample_quotes()))
    }

    #[tokio::test]
    async fn test_static_routes_win_over_id() {
        let addr = serve(memory_state()).await;

        assert_eq!(
            send_json(addr, "GET", "/quotes/count", "").await,
            (200, json!({"count": 4}))
        );

        let (status, quote) = send_json(addr, "GET", "/quotes/random", "").await;
        assert_eq!(status, 200);
        assert!(quote["id"].is_i64());

        let (status, quotes) = send_json(addr, "GET", "/quotes/filter?author=rick", "").await;
        assert_eq!(status, 200);
        assert_eq!(quotes[0]["author"], json!("Rick Cook"));

        let (status, quote) = send_json(addr, "GET", "/quotes/5", "").await;
        assert_eq!(status, 200);
        assert_eq!(quote["author"], json!("Waldi Ravens"));
    }

    #[tokio::test]
    async fn test_error_bodies_are_json() {
        let addr = serve(memory_state()).await;

        let (status, body) = send_json(addr, "GET", "/quotes/filter?sort=asc", "").await;
        assert_eq!(status, 400);
        assert!(body["message"].is_string());

        let (status, body) = send_json(addr, "GET", "/quotes/abc", "").await;
        assert_eq!(status, 400);
        assert!(body["message"].is_string());

        let (status, body) =
            send_json(addr, "POST", "/quotes", r#"{"author": "Ada", "text": "x", "id": 1}"#).await;
        assert_eq!(status, 400);
        assert!(body["message"].is_string());

        assert_eq!(
            send_json(addr, "GET", "/nowhere", "").await,
            (404, json!({"message": "Resource not found"}))
        );

        let (status, body) = send_json(addr, "PATCH", "/quotes/3", "").await;
        assert_eq!(status, 405);
        assert_eq!(body, json!({"message": "Method not allowed"}));
    }

    #[tokio::test]
    async fn test_authors_mounted_only_for_sqlite() {
        let addr = serve(memory_state()).await;
        assert_eq!(
            send_json(addr, "GET", "/authors", "").await,
            (404, json!({"message": "Resource not found"}))
        );

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let addr = serve(AppState::sqlite(db)).await;
        assert_eq!(send_json(addr, "GET", "/authors", "").await, (200, json!([])));

        let (status, created) =
            send_json(addr, "POST", "/quotes", r#"{"author": "Ada", "text": "x", "rating": 9}"#)
                .await;
        assert_eq!(status, 201);
        assert_eq!(created["rating"], json!(1));

        let (status, authors) = send_json(addr, "GET", "/authors", "").await;
        assert_eq!(status, 200);
        assert_eq!(authors[0]["name"], json!("Ada"));

        assert_eq!(send(addr, "GET", "/health", "").await, (200, "OK".to_string()));
    }
}
