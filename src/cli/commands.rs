//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infinite-scroll movie catalog browser
#[derive(Parser, Debug)]
#[command(name = "movie-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the feed: Enter scrolls, `/term` searches, `r` retries, `q` quits
    Browse {
        /// Initial search term (empty = popular movies)
        #[arg(short, long)]
        search: Option<String>,

        /// Scroll until this many pages are loaded, then exit
        #[arg(short, long)]
        pages: Option<usize>,
    },

    /// Show the most frequent searches from the file store
    Trending {
        /// Number of entries to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Print the effective configuration (API key masked)
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_browse() {
        let cli = Cli::parse_from(["movie-feed", "-v", "browse", "--search", "dune", "--pages", "3"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Browse { search, pages } => {
                assert_eq!(search.as_deref(), Some("dune"));
                assert_eq!(pages, Some(3));
            }
            other => panic!("Expected Browse, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_trending_default_limit() {
        let cli = Cli::parse_from(["movie-feed", "trending", "--config", "feed.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("feed.yaml")));
        assert!(matches!(cli.command, Commands::Trending { limit: 5 }));
    }
}
