//! Page fetcher module
//!
//! The fetcher is the boundary collaborator of the pagination controller:
//! given a page number it asynchronously returns one [`Page`] or a
//! classified [`Error`](crate::Error).
//!
//! # Overview
//!
//! - `PageFetcher` - trait injected into the controller at construction
//! - `ShowFetcher` - EpisoDate catalogue implementation over `HttpClient`
//! - `DetailsFetcher` - single-show lookups, outside the pagination flow

mod details;
mod shows;

pub use details::{DetailsFetcher, DetailsPayload, ShowDetailsResponse};
pub use shows::{ShowFetcher, ShowPageResponse};

use crate::error::Result;
use crate::types::Page;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of paginated items
#[async_trait]
pub trait PageFetcher: Send + Sync + 'static {
    /// Item type carried by each page
    type Item: Clone + Send + Sync + 'static;

    /// Fetch one page (1-based).
    ///
    /// The returned page's `page_number` must be the page actually served;
    /// callers trust it over the requested number.
    async fn fetch_page(&self, page: u32) -> Result<Page<Self::Item>>;
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for Arc<F> {
    type Item = F::Item;

    async fn fetch_page(&self, page: u32) -> Result<Page<Self::Item>> {
        (**self).fetch_page(page).await
    }
}
