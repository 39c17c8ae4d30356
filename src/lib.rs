pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use store::{Collection, DocumentStore};

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: config::AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: config::AppConfig) -> Self {
        Self { store, config }
    }

    /// Absolute URL of a collection under the configured base URI.
    pub fn collection_url(&self, collection: Collection) -> String {
        self.config.collection_url(collection.path())
    }
}
