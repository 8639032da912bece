//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod interactive;
pub mod locate;
pub mod search;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::nominatim::NominatimBackend;
use crate::search::{GeocodeClient, SearchQuery};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Australian address lookup with a 10 km radius map
#[derive(Parser)]
#[command(name = "radius-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for addresses and list the candidates
    Search(search::SearchArgs),

    /// Pick a candidate and render its map view
    Locate(locate::LocateArgs),

    /// Line-driven search session
    Interactive(interactive::InteractiveArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for output formats
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Interactive(args) => interactive::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Geocode client against the configured endpoint
fn geocode_client(config: &Config) -> Result<GeocodeClient<NominatimBackend>> {
    Ok(GeocodeClient::new(NominatimBackend::new(&config.search)?))
}

/// Join positional words into a query, rejecting blank input
fn query_from_words(words: &[String], min_len: usize) -> Result<SearchQuery> {
    let query = SearchQuery::new(&words.join(" "));
    if query.raw().chars().count() < min_len {
        return Err(Error::InvalidQuery(
            crate::session::EMPTY_SUBMIT_MESSAGE.to_string(),
        ));
    }
    Ok(query)
}
