//! Request extractors that report failures as [`AppError`].

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::query::QueryParams;

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(QueryParams::from_query_string(parts.uri.query().unwrap_or_default()))
    }
}

/// JSON request body. An empty body reads as `{}` so that presence checks,
/// not the parser, decide what is missing.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read body: {e}")))?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw)
            .map(JsonBody)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))
    }
}

/// Parse a path identifier; anything that is not a UUID cannot exist.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("No resource with id '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Default)]
    struct Payload {
        title: Option<String>,
    }

    async fn extract(body: &'static str) -> Result<Payload, AppError> {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        JsonBody::<Payload>::from_request(req, &()).await.map(|b| b.0)
    }

    #[tokio::test]
    async fn empty_body_reads_as_empty_object() {
        assert!(extract("").await.unwrap().title.is_none());
        assert!(extract("  \n").await.unwrap().title.is_none());
    }

    #[tokio::test]
    async fn json_body_is_parsed() {
        assert_eq!(extract(r#"{"title":"x"}"#).await.unwrap().title.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        assert!(matches!(extract("{").await, Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert!(parse_id("abc").unwrap_err().is_not_found());
        assert!(parse_id(&Uuid::nil().to_string()).is_ok());
    }
}
