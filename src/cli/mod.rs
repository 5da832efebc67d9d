//! CLI module
//!
//! Command-line interface for browsing show listings.
//!
//! # Commands
//!
//! - `popular` - Scroll through the most popular shows
//! - `search` - Scroll through search results
//! - `page` - Fetch and print a single page
//! - `details` - Look up one show by id or permalink

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
