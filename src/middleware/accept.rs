//! Content negotiation guard: the API only speaks JSON.

use axum::{
    extract::Request,
    http::{header::ACCEPT, Method},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;

const NOT_ACCEPTABLE_MESSAGE: &str =
    "Webservice only support json. Did you forget the Accept header?";

/// Reject requests whose `Accept` header does not mention `application/json`.
/// `OPTIONS` requests always pass.
pub async fn require_json(request: Request, next: Next) -> Result<Response, AppError> {
    ensure_json(&request)?;
    Ok(next.run(request).await)
}

/// The check behind [`require_json`], for handlers outside the guarded routes.
pub fn ensure_json(request: &Request) -> Result<(), AppError> {
    if request.method() == Method::OPTIONS || accepts_json(request) {
        return Ok(());
    }

    tracing::debug!(method = %request.method(), uri = %request.uri(), "Rejected non-JSON request");
    Err(AppError::NotAcceptable(NOT_ACCEPTABLE_MESSAGE.to_string()))
}

fn accepts_json(request: &Request) -> bool {
    request
        .headers()
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains("application/json"))
}
