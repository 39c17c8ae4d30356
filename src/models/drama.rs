//! Drama catalog resource.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::links::ResourceLinks;
use crate::store::Document;

/// Fields read back in collection listings.
pub const SUMMARY_FIELDS: &[&str] = &["title", "englishTitle", "releaseYear"];

/// Stored body of a drama document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DramaFields {
    pub title: String,
    pub english_title: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    pub episodes: u32,
    pub release_year: i32,
    #[serde(default)]
    pub cast: Vec<String>,
}

/// Full drama representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drama {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: DramaFields,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
}

impl Drama {
    pub fn from_document(doc: Document, collection_url: &str) -> Result<Self, AppError> {
        let fields = serde_json::from_value(doc.body)
            .map_err(|e| AppError::Internal(format!("Malformed drama {}: {e}", doc.id)))?;
        Ok(Self {
            id: doc.id,
            fields,
            links: ResourceLinks::for_item(collection_url, doc.id),
        })
    }
}

/// Summary DTO for list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DramaSummary {
    pub id: Uuid,
    pub title: String,
    pub english_title: Option<String>,
    pub release_year: i32,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryBody {
    title: String,
    english_title: Option<String>,
    release_year: i32,
}

impl DramaSummary {
    pub fn from_document(doc: Document, collection_url: &str) -> Result<Self, AppError> {
        let body: SummaryBody = serde_json::from_value(doc.body)
            .map_err(|e| AppError::Internal(format!("Malformed drama {}: {e}", doc.id)))?;
        Ok(Self {
            id: doc.id,
            title: body.title,
            english_title: body.english_title,
            release_year: body.release_year,
            links: ResourceLinks::for_item(collection_url, doc.id),
        })
    }
}

/// Full drama payload for create and replace; every field must be present and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDrama {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub english_title: Option<String>,
    #[validate(required)]
    pub genre: Option<Vec<String>>,
    #[validate(required, range(min = 1))]
    pub episodes: Option<u32>,
    #[validate(required, range(min = 1))]
    pub release_year: Option<i32>,
    #[validate(required)]
    pub cast: Option<Vec<String>>,
}

impl CreateDrama {
    /// Validate presence of every field and convert to the stored form.
    pub fn into_fields(self) -> Result<DramaFields, AppError> {
        const MESSAGE: &str = "All fields are required";

        self.validate()
            .map_err(|_| AppError::Validation(MESSAGE.to_string()))?;

        match self {
            CreateDrama {
                title: Some(title),
                english_title: Some(english_title),
                genre: Some(genre),
                episodes: Some(episodes),
                release_year: Some(release_year),
                cast: Some(cast),
            } => Ok(DramaFields {
                title,
                english_title: Some(english_title),
                genre,
                episodes,
                release_year,
                cast,
            }),
            _ => Err(AppError::Validation(MESSAGE.to_string())),
        }
    }
}

/// Partial drama payload for PATCH.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDrama {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
}

impl UpdateDrama {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.english_title.is_none()
            && self.genre.is_none()
            && self.episodes.is_none()
            && self.release_year.is_none()
            && self.cast.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> CreateDrama {
        serde_json::from_value(json!({
            "title": "琅琊榜",
            "englishTitle": "Nirvana in Fire",
            "genre": ["Historical"],
            "episodes": 54,
            "releaseYear": 2015,
            "cast": ["Hu Ge", "Liu Tao"]
        }))
        .unwrap()
    }

    #[test]
    fn complete_payload_converts() {
        let fields = complete().into_fields().unwrap();
        assert_eq!(fields.english_title.as_deref(), Some("Nirvana in Fire"));
        assert_eq!(fields.episodes, 54);
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut input = complete();
        input.cast = None;
        let err = input.into_fields().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: All fields are required");
    }

    #[test]
    fn empty_title_and_zero_episodes_are_rejected() {
        let mut input = complete();
        input.title = Some(String::new());
        assert!(input.into_fields().is_err());

        let mut input = complete();
        input.episodes = Some(0);
        assert!(input.into_fields().is_err());
    }

    #[test]
    fn drama_representation_hides_nothing_but_adds_links() {
        let id = Uuid::now_v7();
        let doc = Document {
            id,
            body: serde_json::to_value(complete().into_fields().unwrap()).unwrap(),
        };
        let drama = Drama::from_document(doc, "http://api.test/chinadramas").unwrap();
        let json = serde_json::to_value(&drama).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["englishTitle"], "Nirvana in Fire");
        assert_eq!(json["releaseYear"], 2015);
        assert_eq!(
            json["_links"]["self"]["href"],
            format!("http://api.test/chinadramas/{id}")
        );
    }

    #[test]
    fn summary_from_projected_document() {
        let doc = Document {
            id: Uuid::nil(),
            body: json!({ "title": "a", "englishTitle": "b", "releaseYear": 2020 }),
        };
        let summary = DramaSummary::from_document(doc, "http://api.test/chinadramas").unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["title"], "a");
        assert!(json.get("cast").is_none());
        assert_eq!(json["_links"]["collection"]["href"], "http://api.test/chinadramas");
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = UpdateDrama {
            episodes: Some(40),
            ..UpdateDrama::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "episodes": 40 }));
        assert!(UpdateDrama::default().is_empty());
    }
}
