//! Directions link output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{Listing, OutputFormatter};

/// URL formatter - walking directions from the position to the nearest point
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        listing: &Listing<'_>,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let origin = listing.origin.ok_or_else(|| {
            Error::InvalidInput("No location fix to route from".to_string())
        })?;
        let nearest = listing.points.first().ok_or_else(|| {
            Error::NotFound("No unsolved place to route to".to_string())
        })?;

        config.directions_url(provider, origin, nearest.point.coords, &nearest.point.name)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Directions link to the nearest point"
    }

    fn format(&self, listing: &Listing<'_>, config: &Config) -> Result<String> {
        self.format_with_provider(listing, config, None)
    }
}
