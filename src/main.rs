//! radius-check CLI entry point
//!
//! Australian address lookup with a 10 km radius map view

use radius_check::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
