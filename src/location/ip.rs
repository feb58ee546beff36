//! IP-based geolocation
//!
//! Uses ip-api.com for a coarse city-level fix. Good enough to seed the
//! ranked list when no device position is available.

use crate::constants::api::IP_API_URL;
use crate::constants::http::USER_AGENT;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::location::LocationProvider;
use serde::Deserialize;
use tracing::{debug, warn};

/// IP location service
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl IpApiResponse {
    /// A failed lookup or a response without coordinates means "no fix"
    fn into_coordinates(self) -> Result<Option<Coordinates>> {
        if self.status != "success" {
            warn!(
                "IP location lookup failed: {}",
                self.message.as_deref().unwrap_or("unknown reason")
            );
            return Ok(None);
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lng)) => {
                let coords = Coordinates::try_new(lat, lng)?;
                debug!(
                    "IP location: {} ({})",
                    coords,
                    self.city.as_deref().unwrap_or("unknown city")
                );
                Ok(Some(coords))
            }
            _ => Ok(None),
        }
    }
}

impl IpLocator {
    /// Create an IP locator against ip-api.com
    pub fn new() -> Result<Self> {
        Self::with_url(IP_API_URL)
    }

    /// Create an IP locator against a different endpoint with the same schema
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn fetch(&self) -> Result<Option<Coordinates>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse IP location response: {}", e)))?;

        data.into_coordinates()
    }
}

impl LocationProvider for IpLocator {
    fn name(&self) -> &'static str {
        "ip"
    }

    async fn locate(&self) -> Result<Option<Coordinates>> {
        self.fetch().await
    }
}
