//! Common types used throughout showfeed
//!
//! This module contains the records shared by the fetcher, the
//! pagination controller and the CLI.

use serde::{Deserialize, Serialize};

// ============================================================================
// Page
// ============================================================================

/// One fetched batch of items plus pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Page actually served (1-based)
    pub page_number: u32,
    /// Total number of pages known to the server
    pub total_pages: u32,
    /// Total number of items across all pages
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Create a page, normalising the counters so that
    /// `1 <= page_number <= total_pages`.
    pub fn new(items: Vec<T>, page_number: u32, total_pages: u32, total_items: u64) -> Self {
        let page_number = page_number.max(1);
        Self {
            items,
            page_number,
            total_pages: total_pages.max(page_number),
            total_items,
        }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the server reports further pages after this one
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

// ============================================================================
// Shows
// ============================================================================

/// A TV show as listed by the catalogue endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    pub name: String,
    pub permalink: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image_thumbnail_path: Option<String>,
}

/// Which paginated listing to browse
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShowQuery {
    /// Most popular shows
    #[default]
    Popular,
    /// Shows whose name matches the search term
    Search(String),
}

impl ShowQuery {
    /// Endpoint path relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            ShowQuery::Popular => "most-popular",
            ShowQuery::Search(_) => "search",
        }
    }

    /// Query parameters for the given page
    pub fn params(&self, page: u32) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(2);
        if let ShowQuery::Search(term) = self {
            params.push(("q".to_string(), term.clone()));
        }
        params.push(("page".to_string(), page.to_string()));
        params
    }
}

impl std::fmt::Display for ShowQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShowQuery::Popular => write!(f, "popular"),
            ShowQuery::Search(term) => write!(f, "search '{term}'"),
        }
    }
}

// ============================================================================
// Show details
// ============================================================================

/// Full record of one show, as served by the `show-details` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowDetails {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Episode length in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One show to look up, by numeric id or permalink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowLookup(pub String);

impl ShowLookup {
    /// Endpoint path relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        "show-details"
    }

    /// Query parameters identifying the show
    pub fn params(&self) -> Vec<(String, String)> {
        vec![("q".to_string(), self.0.clone())]
    }
}

impl std::fmt::Display for ShowLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_normalisation() {
        let page = Page::new(vec![1, 2, 3], 0, 0, 3);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());

        // Server claims page 4 of 2; trust the served page
        let page = Page::new(vec![1], 4, 2, 40);
        assert_eq!(page.page_number, 4);
        assert_eq!(page.total_pages, 4);

        let page: Page<u8> = Page::new(vec![], 1, 5, 100);
        assert!(page.has_next());
        assert!(page.is_empty());
    }

    #[test]
    fn test_show_query_params() {
        assert_eq!(ShowQuery::Popular.endpoint(), "most-popular");
        assert_eq!(
            ShowQuery::Popular.params(2),
            vec![("page".to_string(), "2".to_string())]
        );

        let search = ShowQuery::Search("lost".to_string());
        assert_eq!(search.endpoint(), "search");
        assert_eq!(
            search.params(1),
            vec![
                ("q".to_string(), "lost".to_string()),
                ("page".to_string(), "1".to_string())
            ]
        );
        assert_eq!(search.to_string(), "search 'lost'");
    }

    #[test]
    fn test_show_deserialize_with_missing_optionals() {
        let show: Show = serde_json::from_value(serde_json::json!({
            "id": 35624,
            "name": "The Flash",
            "permalink": "the-flash",
            "network": "The CW",
            "end_date": null
        }))
        .unwrap();
        assert_eq!(show.id, 35624);
        assert_eq!(show.network.as_deref(), Some("The CW"));
        assert!(show.start_date.is_none());
        assert!(show.end_date.is_none());
    }

    #[test]
    fn test_show_lookup_params() {
        let lookup = ShowLookup("the-flash".to_string());
        assert_eq!(lookup.endpoint(), "show-details");
        assert_eq!(
            lookup.params(),
            vec![("q".to_string(), "the-flash".to_string())]
        );
        assert_eq!(lookup.to_string(), "the-flash");
    }

    #[test]
    fn test_show_details_null_genres() {
        let details: ShowDetails = serde_json::from_value(serde_json::json!({
            "id": 35624,
            "name": "The Flash",
            "runtime": 60,
            "genres": null
        }))
        .unwrap();
        assert_eq!(details.runtime, Some(60));
        assert!(details.genres.is_empty());
        assert!(details.permalink.is_none());
    }
}
