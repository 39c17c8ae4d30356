//! Recognized collection query parameters and the filters built from them.

use serde_json::Value;
use url::form_urlencoded;

use crate::store::Filter;

/// Query string of a collection read. Unrecognized keys are dropped.
///
/// Values stay raw strings: numbers are interpreted leniently further down
/// and filters are echoed back into links exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub genre: Option<String>,
    pub release_year: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl QueryParams {
    /// Decode a raw query string. The first occurrence of a repeated key wins.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "genre" => &mut params.genre,
                "releaseYear" => &mut params.release_year,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// A filter derived from query parameters.
///
/// `store_filter` is what the store evaluates; `query_pairs` is what
/// navigation links re-embed, in a fixed order.
pub trait QueryFilter {
    fn store_filter(&self) -> Filter;

    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Collections without filterable fields.
impl QueryFilter for () {
    fn store_filter(&self) -> Filter {
        Filter::new()
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Drama filter: `genre` and `releaseYear` exact matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DramaFilter {
    pub genre: Option<String>,
    pub release_year: Option<String>,
}

impl DramaFilter {
    /// Copy the recognized, non-empty filter parameters.
    pub fn from_query(params: &QueryParams) -> Self {
        Self {
            genre: non_empty(params.genre.as_deref()),
            release_year: non_empty(params.release_year.as_deref()),
        }
    }
}

impl QueryFilter for DramaFilter {
    fn store_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(genre) = &self.genre {
            filter = filter.with("genre", genre.as_str());
        }
        if let Some(year) = &self.release_year {
            // Years are stored as numbers; a value that is not an integer
            // stays a string and therefore matches nothing.
            let value = year
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(year.as_str()));
            filter = filter.with("releaseYear", value);
        }
        filter
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(genre) = &self.genre {
            pairs.push(("genre", genre.clone()));
        }
        if let Some(year) = &self.release_year {
            pairs.push(("releaseYear", year.clone()));
        }
        pairs
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Leading-integer parse: optional whitespace and sign, then digits up to the
/// first non-digit (`"2abc"` is 2). Saturates instead of overflowing.
/// Returns `None` when no digit is found.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: Vec<i64> = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .iter()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(*d));
    Some(if negative { -magnitude } else { magnitude })
}
