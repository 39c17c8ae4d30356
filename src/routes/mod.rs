//! Route definitions and router assembly.

pub mod dramas;
pub mod health;
pub mod notes;

use axum::{
    extract::Request,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW,
        },
        HeaderValue, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::errors::AppError;
use crate::middleware::accept::{ensure_json, require_json};
use crate::AppState;

const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";
const COLLECTION_METHODS: &str = "GET, POST, OPTIONS";
const ITEM_METHODS: &str = "GET, PUT, PATCH, DELETE, OPTIONS";

fn allow(methods: &'static str) -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (ALLOW, methods),
            (ACCESS_CONTROL_ALLOW_METHODS, methods),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
    )
        .into_response()
}

/// OPTIONS on a collection.
pub async fn options_collection() -> Response {
    allow(COLLECTION_METHODS)
}

/// OPTIONS on a single resource.
pub async fn options_item() -> Response {
    allow(ITEM_METHODS)
}

/// `Access-Control-Allow-Origin: *` on every response. Preflights are
/// answered by the OPTIONS handlers.
fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
}

/// Full API router. Resource routes only answer clients that accept JSON;
/// health probes are exempt.
pub fn router(state: AppState) -> Router {
    let drama_routes = Router::new()
        .route(
            "/chinadramas",
            get(dramas::list)
                .post(dramas::create)
                .options(options_collection),
        )
        .route("/chinadramas/seed", post(dramas::seed))
        .route(
            "/chinadramas/{id}",
            get(dramas::get_by_id)
                .put(dramas::replace)
                .patch(dramas::update)
                .delete(dramas::delete)
                .options(options_item),
        );

    let note_routes = Router::new()
        .route(
            "/notes",
            get(notes::list)
                .post(notes::create)
                .options(options_collection),
        )
        .route(
            "/notes/{id}",
            get(notes::get_by_id)
                .put(notes::update)
                .patch(notes::update)
                .delete(notes::delete)
                .options(options_item),
        );

    Router::new()
        .merge(drama_routes)
        .merge(note_routes)
        .layer(middleware::from_fn(require_json))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .layer(allow_any_origin())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn database_down(request: Request) -> AppError {
    match ensure_json(&request) {
        Ok(()) => AppError::DatabaseDown,
        Err(rejected) => rejected,
    }
}

/// Router served when the database could not be reached at startup. JSON
/// clients get a 500 on every path; other clients still get the 406.
pub fn database_down_router() -> Router {
    Router::new()
        .fallback(database_down)
        .layer(allow_any_origin())
        .layer(TraceLayer::new_for_http())
}
