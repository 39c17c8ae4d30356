//! Notes service.

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::note::{Note, NoteFields};
use crate::models::pagination::PageRequest;
use crate::models::query::QueryParams;
use crate::services::collection::{self, CollectionQuery, CollectionResponse};
use crate::store::{Collection, DocumentStore};

const COLLECTION: Collection = Collection::Notes;

fn not_found() -> AppError {
    AppError::NotFound("Note not found".to_string())
}

fn encode(input: &NoteFields) -> Result<serde_json::Value, AppError> {
    if input.is_empty() {
        return Err(AppError::Validation("Body cannot be empty".to_string()));
    }
    serde_json::to_value(input)
        .map_err(|e| AppError::Internal(format!("Failed to encode note: {e}")))
}

/// List notes. Only `page` and `limit` apply; notes have no filters.
pub async fn list(
    store: &dyn DocumentStore,
    collection_url: &str,
    params: &QueryParams,
) -> Result<CollectionResponse<Note>, AppError> {
    let query = CollectionQuery {
        collection: COLLECTION,
        collection_url,
        filter: &(),
        page: PageRequest::from_query(params),
        projection: None,
    };
    collection::list(store, query, |doc| Note::from_document(doc, collection_url)).await
}

pub async fn create(
    store: &dyn DocumentStore,
    collection_url: &str,
    input: &NoteFields,
) -> Result<Note, AppError> {
    let doc = store.insert(COLLECTION, encode(input)?).await?;
    tracing::info!(id = %doc.id, "Note created");
    Note::from_document(doc, collection_url)
}

pub async fn find_by_id(
    store: &dyn DocumentStore,
    collection_url: &str,
    id: Uuid,
) -> Result<Note, AppError> {
    let doc = store.find_by_id(COLLECTION, id).await?.ok_or_else(not_found)?;
    Note::from_document(doc, collection_url)
}

/// Merge the given fields into a note. Serves both PUT and PATCH.
pub async fn update(
    store: &dyn DocumentStore,
    collection_url: &str,
    id: Uuid,
    input: &NoteFields,
) -> Result<Note, AppError> {
    let doc = store
        .update(COLLECTION, id, encode(input)?)
        .await?
        .ok_or_else(not_found)?;
    Note::from_document(doc, collection_url)
}

pub async fn delete(store: &dyn DocumentStore, id: Uuid) -> Result<(), AppError> {
    if store.delete(COLLECTION, id).await? {
        Ok(())
    } else {
        Err(not_found())
    }
}
