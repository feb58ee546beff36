//! geo-quiz CLI entry point
//!
//! Location-based trivia - CLI + web app

use geo_quiz::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
