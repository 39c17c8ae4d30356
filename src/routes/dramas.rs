//! Drama catalog routes: collection reads, CRUD, and seeding.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::middleware::extractors::{parse_id, JsonBody};
use crate::models::drama::{CreateDrama, Drama, DramaSummary, UpdateDrama};
use crate::models::query::QueryParams;
use crate::services::collection::CollectionResponse;
use crate::services::drama as drama_service;
use crate::services::seed::{self as seed_service, SeedRequest};
use crate::store::Collection;
use crate::AppState;

const COLLECTION: Collection = Collection::Dramas;

/// GET /chinadramas: list dramas with filters, pagination and navigation links.
pub async fn list(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<CollectionResponse<DramaSummary>>, AppError> {
    let url = state.collection_url(COLLECTION);
    let result = drama_service::list(state.store.as_ref(), &url, &params).await?;
    Ok(Json(result))
}

/// POST /chinadramas: create a drama; every field is required.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateDrama>,
) -> Result<(StatusCode, Json<Drama>), AppError> {
    let url = state.collection_url(COLLECTION);
    let drama = drama_service::create(state.store.as_ref(), &url, body).await?;
    Ok((StatusCode::CREATED, Json(drama)))
}

/// POST /chinadramas/seed: insert fake dramas, optionally clearing the collection.
pub async fn seed(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SeedRequest>,
) -> Result<Json<Vec<Drama>>, AppError> {
    let url = state.collection_url(COLLECTION);
    let amount = body.amount()?;
    let fields = seed_service::fake_dramas(&mut rand::thread_rng(), amount);
    let dramas =
        seed_service::seed_dramas(state.store.as_ref(), &url, body.reset, fields).await?;
    Ok(Json(dramas))
}

/// GET /chinadramas/{id}: get drama by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Drama>, AppError> {
    let url = state.collection_url(COLLECTION);
    let drama = drama_service::find_by_id(state.store.as_ref(), &url, parse_id(&id)?).await?;
    Ok(Json(drama))
}

/// PUT /chinadramas/{id}: overwrite all fields of a drama.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<CreateDrama>,
) -> Result<Json<Drama>, AppError> {
    let url = state.collection_url(COLLECTION);
    let drama =
        drama_service::replace(state.store.as_ref(), &url, parse_id(&id)?, body).await?;
    Ok(Json(drama))
}

/// PATCH /chinadramas/{id}: update the given fields of a drama.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateDrama>,
) -> Result<Json<Drama>, AppError> {
    let url = state.collection_url(COLLECTION);
    let drama =
        drama_service::update(state.store.as_ref(), &url, parse_id(&id)?, &body).await?;
    Ok(Json(drama))
}

/// DELETE /chinadramas/{id}: delete a drama.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    drama_service::delete(state.store.as_ref(), parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
