//! # showfeed
//!
//! Presents a remotely paginated catalogue as a single growing, observable
//! list, with infinite-scroll loading and user-driven retry.
//!
//! ## Features
//!
//! - **Pagination Controller**: Accumulates pages, guards against duplicate
//!   in-flight fetches, discards stale responses after a retry
//! - **Resource Envelope**: Loading / Success / Error around every fetch
//! - **Scroll Trigger**: Requests the next page as the reader nears the end
//! - **EpisoDate Fetcher**: Most-popular and search listings over HTTP, plus
//!   single-show detail lookups
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use showfeed::{FeedConfig, HttpClient, PaginationController, ScrollTrigger, ShowFetcher, ShowQuery};
//!
//! #[tokio::main]
//! async fn main() -> showfeed::Result<()> {
//!     let config = FeedConfig::default();
//!     let client = HttpClient::with_config(config.http_client_config())?;
//!     let controller = PaginationController::spawn(ShowFetcher::new(client, ShowQuery::Popular));
//!
//!     let view = controller.wait_for(|v| !v.is_loading()).await?;
//!     println!("{} shows loaded", view.items().len());
//!
//!     // Reader scrolled to the last item
//!     ScrollTrigger::default().on_scroll(&controller, view.items().len().checked_sub(1));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  on_scroll   ┌──────────────────────┐  fetch_page  ┌─────────────┐
//! │ScrollTrigger │ ───────────▶ │ PaginationController │ ───────────▶ │ PageFetcher │
//! └──────────────┘              │  (task owning state) │ ◀─ Resource ─└─────────────┘
//!        ▲                      └──────────┬───────────┘
//!        │        ViewState (watch)        │
//!        └─────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Feed configuration
pub mod config;

/// HTTP client with rate limiting
pub mod http;

/// Tri-state resource envelope
pub mod resource;

/// Page fetchers
pub mod fetcher;

/// Pagination controller, view state and scroll trigger
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::FeedConfig;
pub use error::{Error, FetchErrorKind, Result};
pub use fetcher::{DetailsFetcher, PageFetcher, ShowFetcher};
pub use http::HttpClient;
pub use pagination::{PaginationController, ScrollTrigger, ViewState};
pub use resource::Resource;
pub use types::{Page, Show, ShowDetails, ShowLookup, ShowQuery};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
