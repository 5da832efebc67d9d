//! EpisoDate show-details fetcher
//!
//! Looks up one show by id or permalink. The API wraps the record in a
//! `tvShow` field and answers an unknown show with `"tvShow": []`.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::{ShowDetails, ShowLookup};
use serde::Deserialize;
use tracing::debug;

/// Wire shape of the show-details response
#[derive(Debug, Clone, Deserialize)]
pub struct ShowDetailsResponse {
    #[serde(rename = "tvShow")]
    pub tv_show: DetailsPayload,
}

/// The `tvShow` field: a record, or an empty list when nothing matched
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DetailsPayload {
    Missing(Vec<serde_json::Value>),
    Found(Box<ShowDetails>),
}

/// Fetches single-show records
#[derive(Debug)]
pub struct DetailsFetcher {
    client: HttpClient,
}

impl DetailsFetcher {
    /// Create a details fetcher over the given client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Look up one show
    pub async fn fetch_details(&self, lookup: &ShowLookup) -> Result<ShowDetails> {
        let resp: ShowDetailsResponse = self
            .client
            .get_json(lookup.endpoint(), &lookup.params())
            .await?;

        match resp.tv_show {
            DetailsPayload::Found(details) => {
                debug!(id = details.id, %lookup, "Show details loaded");
                Ok(*details)
            }
            DetailsPayload::Missing(_) => Err(Error::ShowNotFound {
                lookup: lookup.to_string(),
            }),
        }
    }
}
