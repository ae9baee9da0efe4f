//! CLI runner - executes commands

use crate::analytics::{recorder_from_config, SearchCountStore};
use crate::catalog::CatalogFetcher;
use crate::cli::browser::{Browser, Input, ROW_HEIGHT, VIEWPORT_ROWS};
use crate::cli::commands::{Cli, Commands};
use crate::config::{AnalyticsConfig, FeedConfig};
use crate::error::{Error, Result, ResultExt};
use crate::feed::MovieFeed;
use crate::http::{CatalogClient, HttpClientConfig};
use crate::pagination::{PaginationController, SessionCache};
use crate::trigger::{ObserverOptions, ScrollViewport, SentinelId};
use crate::types::QueryKey;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// The feed has a single sentinel
const SENTINEL: SentinelId = SentinelId(1);

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
        match &self.cli.command {
            Commands::Browse { search, pages } => self.browse(search.as_deref(), *pages).await,
            Commands::Trending { limit } => self.trending(*limit).await,
            Commands::Config => self.show_config(),
        }
    }

    /// Load configuration: file (if given), then environment overrides
    fn load_config(&self) -> Result<FeedConfig> {
        let config = match &self.cli.config {
            Some(path) => FeedConfig::from_file(path)?,
            None => FeedConfig::default(),
        };
        Ok(config.apply_env())
    }

    /// Wire config into a mounted-ready browser
    async fn build_browser(&self, config: &FeedConfig, search: Option<&str>) -> Result<Browser> {
        let client = CatalogClient::new(HttpClientConfig::from_catalog(&config.catalog))?;
        let recorder = recorder_from_config(&config.analytics)
            .await
            .context("Failed to set up search analytics")?;
        let fetcher =
            CatalogFetcher::new(client, recorder).with_dispatch(config.analytics_dispatch);

        let controller = PaginationController::with_cache(
            Arc::new(fetcher),
            QueryKey::new(search),
            SessionCache::new(config.session.stale_time()),
        );

        let (viewport, events) = ScrollViewport::new(ROW_HEIGHT * VIEWPORT_ROWS, ROW_HEIGHT);
        let feed = MovieFeed::new(
            controller,
            viewport.clone(),
            ObserverOptions::from(&config.observer),
            SENTINEL,
        );
        Ok(Browser::new(feed, viewport, events))
    }

    /// Browse the feed
    async fn browse(&self, search: Option<&str>, pages: Option<usize>) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;

        let mut browser = self.build_browser(&config, search).await?;
        info!("Browsing {}", browser.feed().controller().query_key());
        browser.mount().await?;
        print_lines(browser.take_output());

        if let Some(pages) = pages {
            browser.scroll_pages(pages).await?;
            print_lines(browser.take_output());
            return Ok(());
        }

        eprintln!("[Enter] scroll  [/term] search  [r] retry  [q] quit");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let input = Input::parse(&line);
            debug!("Input: {input:?}");
            let keep_going = browser.handle(input).await?;
            print_lines(browser.take_output());
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    /// Show the most frequent searches
    async fn trending(&self, limit: usize) -> Result<()> {
        let config = self.load_config()?;
        let AnalyticsConfig::File { path } = &config.analytics else {
            return Err(Error::config(
                "trending reads the file store: set `analytics.type: file`",
            ));
        };

        let store = SearchCountStore::open(path)
            .await
            .with_context(|| format!("Failed to open search store {}", path.display()))?;
        let top = store.trending(limit).await;
        if top.is_empty() {
            println!("No searches recorded yet.");
            return Ok(());
        }

        for (rank, entry) in top.iter().enumerate() {
            let poster = entry.poster_url.as_deref().unwrap_or("-");
            println!(
                "{}. {} ({} searches) movie #{} {poster}",
                rank + 1,
                entry.search_term,
                entry.count,
                entry.movie_id
            );
        }
        Ok(())
    }

    /// Print the effective config with the API key masked
    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        print!("{}", serde_yaml::to_string(&config.redacted())?);
        Ok(())
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
