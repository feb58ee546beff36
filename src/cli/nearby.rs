//! Nearby command handler
//!
//! Loads the feed and prints unsolved places ranked by distance.

use crate::cli::{init_logging, FeedArgs, LocationArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, Listing};
use crate::poi::feed;
use crate::session::Session;
use clap::Args;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub feed: FeedArgs,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Show at most this many places
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Only show places within this many meters
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");
    let config = Config::load()?;

    let format = args.format.clone().unwrap_or_else(|| config.game.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let source = args.feed.source(&config)?;
    let points = feed::load(&source).await?;
    let mut session = Session::with_points(points)?;

    let position = args.location.resolve().await?.ok_or_else(|| {
        Error::InvalidInput("No location fix. Use --lat/--lng or --here".to_string())
    })?;
    session.update_position(position)?;

    let radius = args.radius.or_else(|| config.game.reveal_radius());
    let limit = args.limit.or_else(|| config.game.list_limit());
    let listing = Listing::from_session(&session, radius, limit);
    let output = formatter.format(&listing, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
