//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geo-quiz/config.toml

pub mod defaults;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::poi::feed::FeedSource;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Point-of-interest feed
    #[serde(default)]
    pub feed: FeedConfig,

    /// Game presentation settings
    #[serde(default)]
    pub game: GameConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Directions link settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// File path or http(s) URL of the GeoJSON feed
    #[serde(default = "default_feed_source")]
    pub source: String,
}

/// Game presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Only reveal unsolved points within this many meters (0 = all)
    #[serde(default = "default_reveal_radius")]
    pub reveal_radius: f64,

    /// Maximum number of entries in listings (0 = all)
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Directions link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default directions provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// Directions URL templates
    ///
    /// Placeholders: {from_lat}, {from_lng}, {to_lat}, {to_lng}, {name}
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_feed_source() -> String {
    DEFAULT_FEED_SOURCE.to_string()
}
fn default_reveal_radius() -> f64 {
    DEFAULT_REVEAL_RADIUS
}
fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/dir/?api=1&origin={from_lat},{from_lng}&destination={to_lat},{to_lng}&travelmode=walking".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/directions?engine=fossgis_osrm_foot&route={from_lat},{from_lng};{to_lat},{to_lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?saddr={from_lat},{from_lng}&daddr={to_lat},{to_lng}&q={name}&dirflg=w".to_string(),
    );
    providers
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: default_feed_source(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reveal_radius: default_reveal_radius(),
            list_limit: default_list_limit(),
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl FeedConfig {
    /// Parsed feed source
    pub fn source(&self) -> Result<FeedSource> {
        self.source.parse()
    }
}

impl GameConfig {
    /// Reveal radius, `None` when every point is revealed
    pub fn reveal_radius(&self) -> Option<f64> {
        (self.reveal_radius > 0.0).then_some(self.reveal_radius)
    }

    /// Listing limit, `None` when unlimited
    pub fn list_limit(&self) -> Option<usize> {
        (self.list_limit > 0).then_some(self.list_limit)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["feed", "source"] => Some(self.feed.source.clone()),

            ["game", "reveal_radius"] => Some(self.game.reveal_radius.to_string()),
            ["game", "list_limit"] => Some(self.game.list_limit.to_string()),
            ["game", "format"] => Some(self.game.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["feed", "source"] => {
                value.parse::<FeedSource>()?;
                self.feed.source = value.trim().to_string();
            }

            ["game", "reveal_radius"] => {
                let radius: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid radius value: {}", value))
                })?;
                if !radius.is_finite() || radius < 0.0 {
                    return Err(Error::Config(format!(
                        "Reveal radius must be a non-negative number: {}",
                        value
                    )));
                }
                self.game.reveal_radius = radius;
            }
            ["game", "list_limit"] => {
                self.game.list_limit = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid limit value: {}", value))
                })?;
            }
            ["game", "format"] => {
                self.game.format = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["url", "default"] => {
                if !self.url.providers.contains_key(value) {
                    return Err(Error::Config(format!("Unknown URL provider: {}", value)));
                }
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "feed.source",
            "game.reveal_radius",
            "game.list_limit",
            "game.format",
            "server.host",
            "server.port",
            "url.default",
        ]
    }

    /// Build a walking-directions link from `from` to `to`
    ///
    /// Uses the named provider, or the configured default.
    pub fn directions_url(
        &self,
        provider: Option<&str>,
        from: Coordinates,
        to: Coordinates,
        name: &str,
    ) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{from_lat}", &from.lat.to_string())
            .replace("{from_lng}", &from.lng.to_string())
            .replace("{to_lat}", &to.lat.to_string())
            .replace("{to_lng}", &to.lng.to_string())
            .replace("{name}", &urlencoding::encode(name)))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
