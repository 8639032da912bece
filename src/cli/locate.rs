//! Locate command handler
//!
//! Searches, picks one candidate and renders its map view through an output
//! formatter.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::url::UrlFormatter;
use crate::format::{available_formats, get_formatter, LocationReport, ResultItem};
use crate::geo::GeocodeCandidate;
use crate::map::{MapController, MapSettings, MapStyle, SceneMap};
use chrono::Utc;
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Address or place to look up
    #[arg(required_unless_present = "list_formats")]
    pub query: Vec<String>,

    /// Which candidate to select (1-based)
    #[arg(long, short = 'p', default_value_t = 1)]
    pub pick: usize,

    /// Base map style: standard or satellite
    #[arg(long, short = 's')]
    pub style: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// URL provider (for url format)
    #[arg(long)]
    pub provider: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let format = args
        .format
        .unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let mut settings = MapSettings::from_config(&config.map)?;
    if let Some(style) = &args.style {
        settings.style = style.parse::<MapStyle>().map_err(Error::Config)?;
    }

    let query = super::query_from_words(&args.query, config.search.min_submit_len)?;
    let client = super::geocode_client(&config)?;
    let candidates = client.search(&query).await?;

    if candidates.is_empty() {
        eprintln!("No results found for '{}'", query.raw());
        std::process::exit(1);
    }

    let report = build_report(query.raw(), &candidates, args.pick, &settings)?;
    eprintln!("Selected: {}", report.item.address.primary);

    let output = match &args.provider {
        Some(provider) if formatter.name() == "url" => {
            UrlFormatter.format_with_provider(&report, &config, Some(provider))?
        }
        _ => formatter.format(&report, &config)?,
    };

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Select candidate `pick` and lay it out on a fresh map
fn build_report(
    query: &str,
    candidates: &[GeocodeCandidate],
    pick: usize,
    settings: &MapSettings,
) -> Result<LocationReport> {
    let candidate = pick
        .checked_sub(1)
        .and_then(|i| candidates.get(i))
        .ok_or_else(|| {
            Error::Config(format!(
                "--pick must be between 1 and {} (got {})",
                candidates.len(),
                pick
            ))
        })?;

    let item = ResultItem::from_candidate(candidate);
    let mut map = MapController::new(SceneMap::default(), settings);
    map.show_location(item.selection());

    Ok(LocationReport {
        query: query.to_string(),
        item,
        radius_meters: settings.radius_meters,
        style: map.style(),
        scene: map.into_widget().scene().clone(),
        generated_at: Utc::now(),
    })
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
