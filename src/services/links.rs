//! Navigation link synthesis for collection responses.
//!
//! Every href is absolute and deterministic: query parameters are emitted as
//! the active filter pairs (in the filter's own order), then `page`, then
//! `limit`, form-urlencoded. Links for unpaginated responses carry the
//! filters only.

use url::form_urlencoded;

use crate::models::links::{Link, NavigationLinks, PageLink, ResourceLinks};
use crate::models::pagination::PaginationState;
use crate::models::query::QueryFilter;

/// Top-level `_links` plus `pagination._links` of one collection response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLinks {
    pub resource: ResourceLinks,
    pub navigation: NavigationLinks,
}

/// Builds page URLs for one collection and one set of active filters.
#[derive(Debug, Clone)]
pub struct PageUrlBuilder<'a> {
    collection_url: &'a str,
    filter_pairs: Vec<(&'static str, String)>,
}

impl<'a> PageUrlBuilder<'a> {
    pub fn new(collection_url: &'a str, filter: &impl QueryFilter) -> Self {
        Self {
            collection_url,
            filter_pairs: filter.query_pairs(),
        }
    }

    /// URL of `page`; `limit` of `None` drops the page parameters entirely.
    pub fn url(&self, page: u64, limit: Option<u64>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.filter_pairs {
            query.append_pair(key, value);
        }
        if let Some(limit) = limit {
            query.append_pair("page", &page.to_string());
            query.append_pair("limit", &limit.to_string());
        }

        let query = query.finish();
        if query.is_empty() {
            self.collection_url.to_string()
        } else {
            format!("{}?{query}", self.collection_url)
        }
    }

    fn page_link(&self, page: u64, limit: Option<u64>) -> PageLink {
        PageLink {
            page,
            href: self.url(page, limit),
        }
    }
}

/// Synthesize `self`/`collection` and `first`/`last`/`previous`/`next`.
pub fn synthesize(
    collection_url: &str,
    filter: &impl QueryFilter,
    state: &PaginationState,
) -> CollectionLinks {
    let builder = PageUrlBuilder::new(collection_url, filter);
    let limit = state.limit;

    let navigation = NavigationLinks {
        first: builder.page_link(1, limit),
        last: builder.page_link(state.last_page(), limit),
        previous: state.previous_page().map(|p| builder.page_link(p, limit)),
        next: state.next_page().map(|p| builder.page_link(p, limit)),
    };

    CollectionLinks {
        resource: ResourceLinks {
            self_link: Link::new(builder.url(state.effective_page, limit)),
            collection: Link::new(collection_url),
        },
        navigation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pagination::PageRequest;
    use crate::models::query::DramaFilter;

    const URL: &str = "http://api.test/chinadramas";

    fn filter(genre: Option<&str>, year: Option<&str>) -> DramaFilter {
        DramaFilter {
            genre: genre.map(String::from),
            release_year: year.map(String::from),
        }
    }

    fn links(f: &DramaFilter, page: &str, limit: Option<&str>, total: u64) -> CollectionLinks {
        let state = PageRequest::parse(Some(page), limit).plan(total);
        synthesize(URL, f, &state)
    }

    #[test]
    fn url_without_parameters_is_bare() {
        let builder = PageUrlBuilder::new(URL, &filter(None, None));
        assert_eq!(builder.url(3, None), URL);
    }

    #[test]
    fn parameter_order_is_fixed() {
        let builder = PageUrlBuilder::new(URL, &filter(Some("Drama"), Some("2020")));
        assert_eq!(
            builder.url(2, Some(10)),
            format!("{URL}?genre=Drama&releaseYear=2020&page=2&limit=10")
        );
    }

    #[test]
    fn values_are_form_encoded() {
        let builder = PageUrlBuilder::new(URL, &filter(Some("Slice of Life & More"), None));
        assert_eq!(builder.url(1, None), format!("{URL}?genre=Slice+of+Life+%26+More"));
    }

    #[test]
    fn first_page_links() {
        let l = links(&filter(None, None), "1", Some("10"), 25);
        assert_eq!(l.resource.self_link.href, format!("{URL}?page=1&limit=10"));
        assert_eq!(l.resource.collection.href, URL);
        assert_eq!(l.navigation.first.page, 1);
        assert_eq!(l.navigation.last.page, 3);
        assert_eq!(l.navigation.last.href, format!("{URL}?page=3&limit=10"));
        assert!(l.navigation.previous.is_none());
        assert_eq!(l.navigation.next.as_ref().map(|n| n.page), Some(2));
    }

    #[test]
    fn clamped_page_links() {
        let l = links(&filter(None, None), "99", Some("10"), 25);
        assert_eq!(l.resource.self_link.href, format!("{URL}?page=3&limit=10"));
        assert!(l.navigation.next.is_none());
        let previous = l.navigation.previous.unwrap();
        assert_eq!(previous.page, 2);
        assert_eq!(previous.href, format!("{URL}?page=2&limit=10"));
    }

    #[test]
    fn empty_collection_points_first_and_last_at_page_one() {
        let l = links(&filter(None, None), "1", Some("10"), 0);
        assert_eq!(l.navigation.first.page, 1);
        assert_eq!(l.navigation.last.page, 1);
        assert_eq!(l.navigation.first.href, l.navigation.last.href);
        assert!(l.navigation.previous.is_none());
        assert!(l.navigation.next.is_none());
    }

    #[test]
    fn unpaginated_links_keep_filters_only() {
        let f = filter(Some("Drama"), None);
        let l = links(&f, "5", None, 5);
        let expected = format!("{URL}?genre=Drama");
        assert_eq!(l.resource.self_link.href, expected);
        assert_eq!(l.navigation.first.href, expected);
        assert_eq!(l.navigation.last.href, expected);
        assert_eq!(l.navigation.last.page, 1);
        assert!(l.navigation.previous.is_none());
        assert!(l.navigation.next.is_none());
    }

    #[test]
    fn every_link_embeds_active_filters() {
        let f = filter(Some("Drama"), Some("2020"));
        let l = links(&f, "2", Some("5"), 20);
        let hrefs = [
            l.resource.self_link.href.clone(),
            l.navigation.first.href.clone(),
            l.navigation.last.href.clone(),
            l.navigation.previous.unwrap().href,
            l.navigation.next.unwrap().href,
        ];
        for href in hrefs {
            assert!(href.starts_with(&format!("{URL}?genre=Drama&releaseYear=2020&page=")));
        }
    }

    #[test]
    fn synthesis_is_deterministic() {
        let f = filter(Some("Wuxia"), Some("2018"));
        assert_eq!(links(&f, "2", Some("3"), 10), links(&f, "2", Some("3"), 10));
    }
}
