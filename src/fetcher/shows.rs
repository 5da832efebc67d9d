//! EpisoDate catalogue fetcher
//!
//! Serves `most-popular` and `search` listings as [`Page<Show>`].

use super::PageFetcher;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Page, Show, ShowQuery};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Wire shape of a paginated listing
#[derive(Debug, Clone, Deserialize)]
pub struct ShowPageResponse {
    /// Total number of shows; the API sends this as a string
    #[serde(deserialize_with = "number_or_string")]
    pub total: u64,
    /// Page served
    pub page: u32,
    /// Total number of pages
    pub pages: u32,
    /// Shows on this page
    #[serde(default)]
    pub tv_shows: Vec<Show>,
}

impl From<ShowPageResponse> for Page<Show> {
    fn from(resp: ShowPageResponse) -> Self {
        Page::new(resp.tv_shows, resp.page, resp.pages, resp.total)
    }
}

fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Fetches pages of one show listing
#[derive(Debug)]
pub struct ShowFetcher {
    client: HttpClient,
    query: ShowQuery,
}

impl ShowFetcher {
    /// Create a fetcher for the given listing
    pub fn new(client: HttpClient, query: ShowQuery) -> Self {
        Self { client, query }
    }
}

#[async_trait]
impl PageFetcher for ShowFetcher {
    type Item = Show;

    async fn fetch_page(&self, page: u32) -> Result<Page<Show>> {
        let params = self.query.params(page);
        let resp: ShowPageResponse = self
            .client
            .get_json(self.query.endpoint(), &params)
            .await?;

        if resp.page != page {
            debug!(requested = page, served = resp.page, "Server served a different page");
        }

        Ok(resp.into())
    }
}
