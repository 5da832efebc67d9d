//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::FeedConfig;
use crate::error::{Error, Result, ResultExt};
use crate::fetcher::{DetailsFetcher, PageFetcher, ShowFetcher};
use crate::http::HttpClient;
use crate::pagination::{PaginationController, ScrollTrigger, ViewState};
use crate::resource::{track, Resource};
use crate::types::{Page, Show, ShowDetails, ShowLookup, ShowQuery};
use futures::StreamExt;
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Popular { max_pages, retries } => {
                self.browse(&config, ShowQuery::Popular, *max_pages, *retries)
                    .await
            }
            Commands::Search {
                query,
                max_pages,
                retries,
            } => {
                self.browse(
                    &config,
                    ShowQuery::Search(query.clone()),
                    *max_pages,
                    *retries,
                )
                .await
            }
            Commands::Page { page, query } => {
                let query = query
                    .as_ref()
                    .map_or(ShowQuery::Popular, |q| ShowQuery::Search(q.clone()));
                self.page(&config, query, *page).await
            }
            Commands::Details { show } => {
                self.details(&config, ShowLookup(show.clone())).await
            }
        }
    }

    fn load_config(&self) -> Result<FeedConfig> {
        let mut config = match &self.cli.config {
            Some(path) => FeedConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => FeedConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
            config.validate()?;
        }

        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    fn fetcher(config: &FeedConfig, query: ShowQuery) -> Result<ShowFetcher> {
        let client = HttpClient::with_config(config.http_client_config())?;
        Ok(ShowFetcher::new(client, query))
    }

    /// Simulate a reader scrolling to the bottom of the list until
    /// `max_pages` pages are shown or the listing ends.
    async fn browse(
        &self,
        config: &FeedConfig,
        query: ShowQuery,
        max_pages: u32,
        retries: u32,
    ) -> Result<()> {
        info!(%query, max_pages, "Browsing");
        let controller = PaginationController::spawn(Self::fetcher(config, query)?);
        let trigger = ScrollTrigger::new(config.prefetch_buffer);
        let mut updates = controller.subscribe();

        let mut printed = 0;
        let mut failures = 0;
        let mut requested: Option<u32> = None;

        loop {
            let view = updates.borrow_and_update().clone();

            match &view {
                ViewState::Loading => {
                    printed = 0;
                    requested = None;
                }
                ViewState::Error { message } => {
                    if failures >= retries {
                        return Err(Error::Other(message.clone()));
                    }
                    failures += 1;
                    warn!(%message, attempt = failures, "Retrying");
                    controller.retry();
                }
                ViewState::Success {
                    items,
                    is_loading_more,
                    has_more_pages,
                    current_page,
                    ..
                } => {
                    for show in &items[printed..] {
                        self.print_show(show)?;
                    }
                    printed = items.len();

                    if !*is_loading_more {
                        if requested.is_some_and(|page| *current_page < page) {
                            if failures >= retries {
                                warn!(page = current_page + 1, "Giving up on next page");
                                return Ok(());
                            }
                            failures += 1;
                        }

                        if !*has_more_pages || *current_page >= max_pages {
                            info!(pages = current_page, shows = printed, "Done");
                            return Ok(());
                        }

                        // The reader has reached the last item
                        if !trigger.on_scroll(&controller, items.len().checked_sub(1)) {
                            warn!(
                                buffer = trigger.buffer(),
                                "Scroll trigger did not fire, stopping"
                            );
                            return Ok(());
                        }
                        requested = Some(current_page + 1);
                    }
                }
            }

            if updates.changed().await.is_err() {
                return Err(Error::Other("pagination controller stopped".to_string()));
            }
        }
    }

    async fn page(&self, config: &FeedConfig, query: ShowQuery, page: u32) -> Result<()> {
        let fetcher = Self::fetcher(config, query)?;
        let updates = track(fetcher.fetch_page(page));
        tokio::pin!(updates);

        while let Some(resource) = updates.next().await {
            match resource {
                Resource::Loading => info!(page, "Fetching page"),
                Resource::Success(result) => self.print_page(&result)?,
                Resource::Error { message, .. } => return Err(Error::Other(message)),
            }
        }
        Ok(())
    }

    async fn details(&self, config: &FeedConfig, lookup: ShowLookup) -> Result<()> {
        let client = HttpClient::with_config(config.http_client_config())?;
        let fetcher = DetailsFetcher::new(client);
        let updates = track(fetcher.fetch_details(&lookup));
        tokio::pin!(updates);

        while let Some(resource) = updates.next().await {
            match resource {
                Resource::Loading => info!(%lookup, "Fetching show details"),
                Resource::Success(details) => match self.cli.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&details)?),
                    OutputFormat::Pretty => println!("{}", format_details(&details)),
                },
                Resource::Error { message, .. } => return Err(Error::Other(message)),
            }
        }
        Ok(())
    }

    fn print_page(&self, page: &Page<Show>) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
            OutputFormat::Pretty => {
                println!(
                    "Page {}/{} ({} shows)",
                    page.page_number, page.total_pages, page.total_items
                );
                for show in &page.items {
                    self.print_show(show)?;
                }
            }
        }
        Ok(())
    }

    fn print_show(&self, show: &Show) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(show)?),
            OutputFormat::Pretty => println!("{}", format_show(show)),
        }
        Ok(())
    }
}

/// One-line human-readable summary of a show
fn format_show(show: &Show) -> String {
    let mut details = Vec::new();
    if let Some(network) = &show.network {
        details.push(network.as_str());
    }
    if let Some(country) = &show.country {
        details.push(country.as_str());
    }
    if let Some(status) = &show.status {
        details.push(status.as_str());
    }

    if details.is_empty() {
        format!("{:>7}  {}", show.id, show.name)
    } else {
        format!("{:>7}  {} ({})", show.id, show.name, details.join(", "))
    }
}

/// Multi-line human-readable summary of a show record
fn format_details(details: &ShowDetails) -> String {
    let mut lines = vec![format!("{} (#{})", details.name, details.id)];

    let fields = [
        ("Network", details.network.clone()),
        ("Country", details.country.clone()),
        ("Status", details.status.clone()),
        ("Started", details.start_date.clone()),
        ("Ended", details.end_date.clone()),
        ("Runtime", details.runtime.map(|m| format!("{m} min"))),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("  {label:<8} {value}"));
        }
    }
    if !details.genres.is_empty() {
        lines.push(format!("  {:<8} {}", "Genres", details.genres.join(", ")));
    }
    if let Some(description) = &details.description {
        lines.push(String::new());
        lines.push(description.clone());
    }

    lines.join("\n")
}
