//! Extractors that report rejections as [`ApiError`] so malformed bodies,
//! paths and query strings get the same `{"message"}` body as every other
//! failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Path parameter extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

/// Query string extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use quotes_core::{FilterQuery, QuotePayload};

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/quotes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_unknown_field_rejected() {
        let req = json_request(r#"{"author": "Ada", "text": "x", "likes": 3}"#);
        let err = ApiJson::<QuotePayload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_malformed_rejected() {
        let req = json_request("{not json");
        let err = ApiJson::<QuotePayload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_accepted() {
        let req = json_request(r#"{"author": "Ada", "text": "x"}"#);
        let ApiJson(payload) = ApiJson::<QuotePayload>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(payload.text.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_query_allow_list() {
        let req = Request::builder()
            .uri("/quotes/filter?author=rick&sort=asc")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = ApiQuery::<FilterQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let req = Request::builder()
            .uri("/quotes/filter?author=rick&rating=3")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let ApiQuery(query) = ApiQuery::<FilterQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(query.author.as_deref(), Some("rick"));
        assert_eq!(query.rating.as_deref(), Some("3"));
    }
}
