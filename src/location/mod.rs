//! Location providers
//!
//! A provider yields the player's position or reports that no fix is
//! available. "No fix" is `Ok(None)`, a normal state the session handles by
//! ranking nothing; it is never replaced by a made-up default location.

pub mod ip;

use crate::coord::Coordinates;
use crate::error::Result;

/// Source of location fixes
pub trait LocationProvider: Send + Sync {
    /// Short name for logs and CLI messages
    fn name(&self) -> &'static str;

    /// Obtain the current position, `None` when no fix is available
    fn locate(&self) -> impl std::future::Future<Output = Result<Option<Coordinates>>> + Send;
}

/// Provider with a position supplied up front (command-line flags, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    coords: Option<Coordinates>,
}

impl FixedLocation {
    /// Always report `coords`
    pub fn new(coords: Coordinates) -> Self {
        Self {
            coords: Some(coords),
        }
    }

    /// Never report a fix
    pub fn unavailable() -> Self {
        Self { coords: None }
    }
}

impl LocationProvider for FixedLocation {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn locate(&self) -> Result<Option<Coordinates>> {
        match self.coords {
            Some(coords) => {
                coords.validate()?;
                Ok(Some(coords))
            }
            None => Ok(None),
        }
    }
}

/// Get the IP geolocation provider
pub fn get_ip_locator() -> Result<ip::IpLocator> {
    ip::IpLocator::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_fixed_location() {
        let provider = FixedLocation::new(Coordinates::new(48.7758, 9.1829));
        assert_eq!(
            provider.locate().await.unwrap(),
            Some(Coordinates::new(48.7758, 9.1829))
        );
        assert_eq!(provider.name(), "fixed");
    }

    #[tokio::test]
    async fn test_unavailable_location() {
        let provider = FixedLocation::unavailable();
        assert_eq!(provider.locate().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fixed_location_validates() {
        let provider = FixedLocation::new(Coordinates::new(-91.0, 0.0));
        assert!(matches!(
            provider.locate().await,
            Err(Error::InvalidCoordinates(_))
        ));
    }
}
