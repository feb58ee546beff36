//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::DEFAULT_FEED_URL;

/// Default point-of-interest feed
pub const DEFAULT_FEED_SOURCE: &str = DEFAULT_FEED_URL;

/// Default reveal radius in meters (0 reveals every unsolved point)
pub const DEFAULT_REVEAL_RADIUS: f64 = 0.0;

/// Default number of entries in listings (0 lists everything)
pub const DEFAULT_LIST_LIMIT: usize = 0;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default directions provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geo-quiz";
