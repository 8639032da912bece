//! Search command handler
//!
//! One-shot geocode that prints the labelled candidates.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::ResultItem;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Address or place to look up
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Output format: text or json
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let query = super::query_from_words(&args.query, config.search.min_submit_len)?;
    let client = super::geocode_client(&config)?;

    let items: Vec<ResultItem> = client
        .search(&query)
        .await?
        .iter()
        .map(ResultItem::from_candidate)
        .collect();

    println!("{}", render(&items, &args.format)?);
    Ok(())
}

fn render(items: &[ResultItem], format: &str) -> Result<String> {
    match format.to_lowercase().as_str() {
        "json" => Ok(serde_json::to_string_pretty(items)?),
        "text" => Ok(render_text(items)),
        other => Err(Error::Config(format!(
            "Unknown format: {} (expected text or json)",
            other
        ))),
    }
}

fn render_text(items: &[ResultItem]) -> String {
    if items.is_empty() {
        return "No results found".to_string();
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut entry = format!("{:>2}. {}", i + 1, item.address.primary);
            if !item.address.secondary.is_empty() {
                entry.push_str(&format!("\n    {}", item.address.secondary));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}
