//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::cli::{init_logging, FeedArgs};
use crate::config::Config;
use crate::error::Result;
use crate::poi::feed;
use crate::server;
use crate::session::Session;
use clap::Args;
use tracing::{info, warn};

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    #[command(flatten)]
    pub feed: FeedArgs,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    init_logging("info");

    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let source = args.feed.source(&config)?;
    let session = match feed::load(&source).await.and_then(Session::with_points) {
        Ok(session) => {
            info!("Loaded {} places from {}", session.quiz().total(), source);
            session
        }
        Err(e) => {
            // Clients can still upload points through PUT /api/points
            warn!("Could not load feed {}: {}", source, e);
            Session::new()
        }
    };

    info!(
        "Starting geo-quiz server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    server::run(config, session).await
}
