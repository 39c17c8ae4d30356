//! Collection reads: count, plan, fetch one window, and assemble the response.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::links::{NavigationLinks, ResourceLinks};
use crate::models::pagination::{PageRequest, PaginationState};
use crate::models::query::QueryFilter;
use crate::services::links::{self, CollectionLinks};
use crate::store::{Collection, Document, DocumentStore};

/// Response body of every collection read.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse<T: Serialize> {
    pub items: Vec<T>,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
    pub pagination: PaginationBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationBlock {
    pub current_page: u64,
    pub current_items: usize,
    pub total_pages: u64,
    pub total_items: u64,
    #[serde(rename = "_links")]
    pub links: NavigationLinks,
}

impl<T: Serialize> CollectionResponse<T> {
    /// Merge the fetched page, its pagination state and links. Items are opaque.
    pub fn assemble(items: Vec<T>, state: &PaginationState, links: CollectionLinks) -> Self {
        let pagination = PaginationBlock {
            current_page: state.effective_page,
            current_items: items.len(),
            total_pages: state.total_pages,
            total_items: state.total_items,
            links: links.navigation,
        };
        Self {
            items,
            links: links.resource,
            pagination,
        }
    }
}

/// One collection read request.
pub struct CollectionQuery<'a, F: QueryFilter> {
    pub collection: Collection,
    pub collection_url: &'a str,
    pub filter: &'a F,
    pub page: PageRequest,
    pub projection: Option<&'a [&'a str]>,
}

/// Run a collection read against the store.
///
/// Store failures propagate before anything is assembled. `represent` maps
/// each fetched document to its public form.
pub async fn list<F, T, R>(
    store: &dyn DocumentStore,
    query: CollectionQuery<'_, F>,
    represent: R,
) -> Result<CollectionResponse<T>, AppError>
where
    F: QueryFilter,
    T: Serialize,
    R: Fn(Document) -> Result<T, AppError>,
{
    let filter = query.filter.store_filter();

    let total_items = store.count(query.collection, &filter).await?;
    let state = query.page.plan(total_items);

    let documents = store
        .find(query.collection, &filter, query.projection, state.window())
        .await?;
    let items = documents
        .into_iter()
        .map(represent)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        collection = query.collection.as_str(),
        total_items,
        page = state.effective_page,
        total_pages = state.total_pages,
        returned = items.len(),
        "Collection read"
    );

    let links = links::synthesize(query.collection_url, query.filter, &state);
    Ok(CollectionResponse::assemble(items, &state, links))
}
