//! Hypermedia link types embedded in responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Link to a numbered page of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page: u64,
    pub href: String,
}

/// `_links` of a single resource and of a collection response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub collection: Link,
}

impl ResourceLinks {
    pub fn for_item(collection_url: &str, id: Uuid) -> Self {
        Self {
            self_link: Link::new(format!("{collection_url}/{id}")),
            collection: Link::new(collection_url),
        }
    }
}

/// `pagination._links`: always all four keys, boundaries serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLinks {
    pub first: PageLink,
    pub last: PageLink,
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_links() {
        let id = Uuid::nil();
        let links = ResourceLinks::for_item("http://api.test/chinadramas", id);
        let json = serde_json::to_value(&links).unwrap();
        assert_eq!(
            json,
            json!({
                "self": { "href": format!("http://api.test/chinadramas/{id}") },
                "collection": { "href": "http://api.test/chinadramas" }
            })
        );
    }

    #[test]
    fn navigation_boundaries_serialize_as_null() {
        let nav = NavigationLinks {
            first: PageLink { page: 1, href: "a".to_string() },
            last: PageLink { page: 1, href: "a".to_string() },
            previous: None,
            next: None,
        };
        let json = serde_json::to_value(&nav).unwrap();
        assert!(json["previous"].is_null());
        assert!(json["next"].is_null());
        assert_eq!(json["first"]["page"], 1);
    }
}
