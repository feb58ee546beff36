//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod nearby;
pub mod play;
pub mod serve;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::location::{get_ip_locator, FixedLocation, LocationProvider};
use crate::poi::feed::FeedSource;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Location-based trivia: find nearby places and answer their questions
#[derive(Parser)]
#[command(name = "geo-quiz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List unsolved places nearest first
    Nearby(nearby::NearbyArgs),

    /// Play interactively on the terminal
    Play(play::PlayArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Position flags shared by commands
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Latitude of the current position
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the current position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,
}

impl LocationArgs {
    /// Resolve the flags to a fix; `None` when no position was given
    pub async fn resolve(&self) -> Result<Option<Coordinates>> {
        if self.here {
            let locator = get_ip_locator()?;
            let coords = locator.locate().await?;
            if let Some(coords) = coords {
                info!("Using {} location {}", locator.name(), coords);
            }
            return Ok(coords);
        }

        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => FixedLocation::new(Coordinates::new(lat, lng)).locate().await,
            _ => FixedLocation::unavailable().locate().await,
        }
    }
}

/// Feed flag shared by commands
#[derive(Args, Debug, Clone, Default)]
pub struct FeedArgs {
    /// GeoJSON feed file or http(s) URL (defaults to feed.source)
    #[arg(long)]
    pub feed: Option<String>,
}

impl FeedArgs {
    /// The feed to load, falling back to the configured one
    pub fn source(&self, config: &Config) -> Result<FeedSource> {
        match &self.feed {
            Some(source) => source.parse(),
            None => config.feed.source(),
        }
    }
}

/// Initialise logging to stderr, honouring `RUST_LOG`
pub fn init_logging(default_level: &str) {
    // A subscriber installed earlier (tests, embedding callers) stays in place
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Play(args) => play::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_nearby() {
        let cli = Cli::try_parse_from([
            "geo-quiz", "nearby", "--lat", "48.7758", "--lng", "-9.1829", "--feed", "places.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Nearby(args) => {
                assert_eq!(args.location.lat, Some(48.7758));
                assert_eq!(args.location.lng, Some(-9.1829));
                assert_eq!(args.feed.feed.as_deref(), Some("places.json"));
            }
            _ => panic!("expected nearby"),
        }
    }

    #[test]
    fn test_lat_requires_lng() {
        assert!(Cli::try_parse_from(["geo-quiz", "nearby", "--lat", "48.7"]).is_err());
    }

    #[test]
    fn test_here_conflicts_with_lat() {
        assert!(Cli::try_parse_from([
            "geo-quiz", "play", "--here", "--lat", "48.7", "--lng", "9.1"
        ])
        .is_err());
    }

    #[tokio::test]
    async fn test_resolve_fixed_location() {
        let args = LocationArgs {
            lat: Some(48.7758),
            lng: Some(9.1829),
            here: false,
        };
        assert_eq!(
            args.resolve().await.unwrap(),
            Some(Coordinates::new(48.7758, 9.1829))
        );

        assert_eq!(LocationArgs::default().resolve().await.unwrap(), None);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging("warn");
        init_logging("info");
    }

    #[test]
    fn test_feed_source_fallback() {
        let mut config = Config::default();
        config.feed.source = "configured.json".to_string();

        let args = FeedArgs::default();
        assert_eq!(
            args.source(&config).unwrap(),
            FeedSource::File(PathBuf::from("configured.json"))
        );

        let args = FeedArgs {
            feed: Some("https://example.org/feed".to_string()),
        };
        assert_eq!(
            args.source(&config).unwrap(),
            FeedSource::Url("https://example.org/feed".to_string())
        );
    }
}
