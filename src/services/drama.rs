//! Drama catalog service: collection reads and single-document CRUD.

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::drama::{CreateDrama, Drama, DramaSummary, UpdateDrama, SUMMARY_FIELDS};
use crate::models::pagination::PageRequest;
use crate::models::query::{DramaFilter, QueryParams};
use crate::services::collection::{self, CollectionQuery, CollectionResponse};
use crate::store::{Collection, DocumentStore};

const COLLECTION: Collection = Collection::Dramas;

fn not_found() -> AppError {
    AppError::NotFound("Drama not found".to_string())
}

/// List dramas matching `genre`/`releaseYear`, optionally paginated.
pub async fn list(
    store: &dyn DocumentStore,
    collection_url: &str,
    params: &QueryParams,
) -> Result<CollectionResponse<DramaSummary>, AppError> {
    let filter = DramaFilter::from_query(params);
    let query = CollectionQuery {
        collection: COLLECTION,
        collection_url,
        filter: &filter,
        page: PageRequest::from_query(params),
        projection: Some(SUMMARY_FIELDS),
    };
    collection::list(store, query, |doc| DramaSummary::from_document(doc, collection_url)).await
}

/// Create a new drama.
pub async fn create(
    store: &dyn DocumentStore,
    collection_url: &str,
    input: CreateDrama,
) -> Result<Drama, AppError> {
    let fields = input.into_fields()?;
    let body = serde_json::to_value(&fields)
        .map_err(|e| AppError::Internal(format!("Failed to encode drama: {e}")))?;
    let doc = store.insert(COLLECTION, body).await?;
    tracing::info!(id = %doc.id, title = %fields.title, "Drama created");
    Drama::from_document(doc, collection_url)
}

/// Find drama by ID.
pub async fn find_by_id(
    store: &dyn DocumentStore,
    collection_url: &str,
    id: Uuid,
) -> Result<Drama, AppError> {
    let doc = store.find_by_id(COLLECTION, id).await?.ok_or_else(not_found)?;
    Drama::from_document(doc, collection_url)
}

/// Overwrite every field of a drama.
pub async fn replace(
    store: &dyn DocumentStore,
    collection_url: &str,
    id: Uuid,
    input: CreateDrama,
) -> Result<Drama, AppError> {
    let fields = input.into_fields()?;
    let changes = serde_json::to_value(&fields)
        .map_err(|e| AppError::Internal(format!("Failed to encode drama: {e}")))?;
    let doc = store
        .update(COLLECTION, id, changes)
        .await?
        .ok_or_else(not_found)?;
    Drama::from_document(doc, collection_url)
}

/// Update the given fields of a drama.
pub async fn update(
    store: &dyn DocumentStore,
    collection_url: &str,
    id: Uuid,
    input: &UpdateDrama,
) -> Result<Drama, AppError> {
    if input.is_empty() {
        return Err(AppError::Validation("Body cannot be empty".to_string()));
    }
    let changes = serde_json::to_value(input)
        .map_err(|e| AppError::Internal(format!("Failed to encode drama update: {e}")))?;
    let doc = store
        .update(COLLECTION, id, changes)
        .await?
        .ok_or_else(not_found)?;
    Drama::from_document(doc, collection_url)
}

/// Delete a drama.
pub async fn delete(store: &dyn DocumentStore, id: Uuid) -> Result<(), AppError> {
    if store.delete(COLLECTION, id).await? {
        tracing::info!(id = %id, "Drama deleted");
        Ok(())
    } else {
        Err(not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    const URL: &str = "http://api.test/chinadramas";

    fn input(title: &str, year: i32) -> CreateDrama {
        serde_json::from_value(json!({
            "title": title,
            "englishTitle": format!("{title} (EN)"),
            "genre": ["Romance"],
            "episodes": 30,
            "releaseYear": year,
            "cast": ["Zhao Liying"]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_find() {
        let store = MemoryStore::new();
        let created = create(&store, URL, input("Story of Minglan", 2018)).await.unwrap();
        let found = find_by_id(&store, URL, created.id).await.unwrap();
        assert_eq!(found.fields, created.fields);
        assert_eq!(found.links.collection.href, URL);
    }

    #[tokio::test]
    async fn create_rejects_incomplete_body() {
        let store = MemoryStore::new();
        let err = create(&store, URL, CreateDrama::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn patch_changes_only_given_fields() {
        let store = MemoryStore::new();
        let created = create(&store, URL, input("Love O2O", 2016)).await.unwrap();
        let update_input = UpdateDrama {
            episodes: Some(31),
            ..UpdateDrama::default()
        };
        let updated = update(&store, URL, created.id, &update_input).await.unwrap();
        assert_eq!(updated.fields.episodes, 31);
        assert_eq!(updated.fields.title, "Love O2O");
    }

    #[tokio::test]
    async fn patch_with_empty_body_is_rejected() {
        let store = MemoryStore::new();
        let created = create(&store, URL, input("Love O2O", 2016)).await.unwrap();
        let err = update(&store, URL, created.id, &UpdateDrama::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Body cannot be empty");
    }

    #[tokio::test]
    async fn replace_and_delete_missing_are_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::now_v7();
        assert!(replace(&store, URL, id, input("x", 2020))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(delete(&store, id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_projects_summary_fields() {
        let store = MemoryStore::new();
        create(&store, URL, input("Eternal Love", 2017)).await.unwrap();
        create(&store, URL, input("Joy of Life", 2019)).await.unwrap();

        let params = QueryParams {
            release_year: Some("2019".to_string()),
            ..QueryParams::default()
        };
        let response = list(&store, URL, &params).await.unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].title, "Joy of Life");
        assert_eq!(response.pagination.total_items, 1);
        assert_eq!(response.links.self_link.href, format!("{URL}?releaseYear=2019"));
    }
}
