//! Free-form notes resource.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::links::ResourceLinks;
use crate::store::Document;

/// Note payload for create, replace and patch. Every field is optional but
/// at least one must be given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl NoteFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.author.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: NoteFields,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
}

impl Note {
    pub fn from_document(doc: Document, collection_url: &str) -> Result<Self, AppError> {
        let fields = serde_json::from_value(doc.body)
            .map_err(|e| AppError::Internal(format!("Malformed note {}: {e}", doc.id)))?;
        Ok(Self {
            id: doc.id,
            fields,
            links: ResourceLinks::for_item(collection_url, doc.id),
        })
    }
}
