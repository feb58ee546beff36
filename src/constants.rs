//! Centralized constants for the geo-quiz crate

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
}

/// External API endpoints
pub mod api {
    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// GeoServer WFS layer serving the default point collection as GeoJSON
    pub const DEFAULT_FEED_URL: &str = "http://193.196.36.78:8080/geoserver/MobileGIS/ows?service=WFS&version=1.0.0&request=GetFeature&typeName=MobileGIS:group_1_data&maxFeatures=50&outputformat=application/json";
}

/// HTTP client settings
pub mod http {
    /// User agent sent with feed and geolocation requests
    pub const USER_AGENT: &str = concat!("geo-quiz/", env!("CARGO_PKG_VERSION"));
}
