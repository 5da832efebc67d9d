//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infinite-scroll browser for TV-show catalogues
#[derive(Parser, Debug)]
#[command(name = "showfeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the catalogue API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scroll through the most popular shows
    Popular {
        /// Stop after this many pages
        #[arg(long, default_value = "3")]
        max_pages: u32,

        /// Times to retry after a failure before giving up
        #[arg(long, default_value = "0")]
        retries: u32,
    },

    /// Scroll through shows matching a search term
    Search {
        /// Search term
        query: String,

        /// Stop after this many pages
        #[arg(long, default_value = "3")]
        max_pages: u32,

        /// Times to retry after a failure before giving up
        #[arg(long, default_value = "0")]
        retries: u32,
    },

    /// Fetch a single page
    Page {
        /// Page number (1-based)
        #[arg(default_value = "1")]
        page: u32,

        /// Search term (omit for the popular listing)
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show the full record of one show
    Details {
        /// Numeric id or permalink
        show: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one show per line)
    Json,
    /// Human-readable output
    Pretty,
}
