//! Output formatters
//!
//! Provides trait-based output formatting for ranked point listings.

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::coord::rank::RankedPoint;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::session::{ProgressReport, Session};
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// What a formatter renders: the visible points plus session progress
#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    /// Position the distances were measured from
    pub origin: Option<Coordinates>,
    /// Unsolved points, nearest first
    pub points: Vec<RankedPoint<'a>>,
    pub progress: ProgressReport,
}

impl<'a> Listing<'a> {
    /// Capture the revealed points of `session`, truncated to `limit`
    pub fn from_session(
        session: &'a Session,
        reveal_radius: Option<f64>,
        limit: Option<usize>,
    ) -> Self {
        let mut points = session.revealed(reveal_radius);
        if let Some(limit) = limit {
            points.truncate(limit);
        }

        Self {
            origin: session.position(),
            points,
            progress: session.progress_report(),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a listing
    ///
    /// `config` supplies directions providers for link output.
    fn format(&self, listing: &Listing<'_>, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON listing".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
        FormatInfo {
            name: "url".to_string(),
            description: "Directions link to the nearest point".to_string(),
        },
    ]
}
