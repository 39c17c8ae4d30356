//! Document store abstraction: schemaless JSON documents grouped in collections.
//!
//! Two backends implement [`DocumentStore`]: [`postgres::PgDocumentStore`] keeps
//! documents in a JSONB table, [`memory::MemoryStore`] keeps them in process.
//! Both follow the same matching rules (see [`FieldMatch::matches`]) and return
//! documents in insertion order.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Dramas,
    Notes,
}

impl Collection {
    /// Discriminator stored alongside each document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Dramas => "dramas",
            Collection::Notes => "notes",
        }
    }

    /// URL path segment under which the collection is served.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Dramas => "chinadramas",
            Collection::Notes => "notes",
        }
    }
}

/// A stored document: identifier plus a JSON object body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: Uuid,
    pub body: Value,
}

impl Document {
    /// Keep only the listed top-level fields of the body.
    pub fn project(mut self, fields: &[&str]) -> Self {
        if let Value::Object(map) = &mut self.body {
            map.retain(|key, _| fields.contains(&key.as_str()));
        }
        self
    }
}

/// Equality constraint on a single top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: &'static str,
    pub value: Value,
}

impl FieldMatch {
    /// A field matches when it equals the expected value, or when it is an
    /// array holding that value.
    pub fn matches(&self, body: &Value) -> bool {
        match body.get(self.field) {
            Some(Value::Array(items)) if !self.value.is_array() => {
                items.iter().any(|item| item == &self.value)
            }
            Some(actual) => actual == &self.value,
            None => false,
        }
    }
}

/// Conjunction of field constraints. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    matches: Vec<FieldMatch>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.matches.push(FieldMatch {
            field,
            value: value.into(),
        });
        self
    }

    pub fn matches(&self) -> &[FieldMatch] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn accepts(&self, body: &Value) -> bool {
        self.matches.iter().all(|m| m.matches(body))
    }
}

/// Skip/limit pair selecting one page of a filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

/// Persistence collaborator used by the services.
///
/// Per-document operations are atomic; nothing coordinates across calls.
#[async_trait]
pub trait DocumentStore: std::fmt::Debug + Send + Sync {
    /// Number of documents in `collection` accepted by `filter`.
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError>;

    /// Documents accepted by `filter` in insertion order, optionally projected
    /// to a subset of fields and restricted to a window.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: Option<&[&str]>,
        window: Option<Window>,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError>;

    async fn insert(&self, collection: Collection, body: Value) -> Result<Document, StoreError>;

    /// Merge the top-level fields of `changes` into the document.
    /// Returns the updated document, or `None` if it does not exist.
    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Value,
    ) -> Result<Option<Document>, StoreError>;

    /// Returns `true` if a document was removed.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError>;

    /// Remove every document of the collection, returning how many were removed.
    async fn clear(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Shallow merge used by `update`: top-level keys of `changes` overwrite `target`.
pub(crate) fn merge_fields(target: &mut Value, changes: Value) {
    let Value::Object(changes) = changes else {
        return;
    };
    match target {
        Value::Object(target) => target.extend(changes),
        other => *other = Value::Object(changes),
    }
}
