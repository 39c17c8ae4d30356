//! Notes routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::middleware::extractors::{parse_id, JsonBody};
use crate::models::note::{Note, NoteFields};
use crate::models::query::QueryParams;
use crate::services::collection::CollectionResponse;
use crate::services::note as note_service;
use crate::store::Collection;
use crate::AppState;

const COLLECTION: Collection = Collection::Notes;

/// GET /notes: list notes with pagination.
pub async fn list(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<CollectionResponse<Note>>, AppError> {
    let url = state.collection_url(COLLECTION);
    let result = note_service::list(state.store.as_ref(), &url, &params).await?;
    Ok(Json(result))
}

/// POST /notes: create a note.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NoteFields>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let url = state.collection_url(COLLECTION);
    let note = note_service::create(state.store.as_ref(), &url, &body).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, AppError> {
    let url = state.collection_url(COLLECTION);
    let note = note_service::find_by_id(state.store.as_ref(), &url, parse_id(&id)?).await?;
    Ok(Json(note))
}

/// PUT and PATCH /notes/{id}: merge the given fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<NoteFields>,
) -> Result<Json<Note>, AppError> {
    let url = state.collection_url(COLLECTION);
    let note = note_service::update(state.store.as_ref(), &url, parse_id(&id)?, &body).await?;
    Ok(Json(note))
}

/// DELETE /notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    note_service::delete(state.store.as_ref(), parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
