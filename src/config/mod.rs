//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/radius-check/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding and session timing
    #[serde(default)]
    pub search: SearchConfig,

    /// Map view settings
    #[serde(default)]
    pub map: MapConfig,

    /// Default values for CLI output
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Geocoding and session timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the Nominatim-compatible service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Debounce quiet period in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum typed length that triggers a search
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Minimum length accepted by an explicit search
    #[serde(default = "default_min_submit_len")]
    pub min_submit_len: usize,
}

/// Map view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial center latitude
    #[serde(default = "default_lat")]
    pub lat: f64,

    /// Initial center longitude
    #[serde(default = "default_lng")]
    pub lng: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Radius circle size in meters
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Base layer style (standard or satellite)
    #[serde(default = "default_style")]
    pub style: String,
}

/// Default values for CLI output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}
fn default_min_submit_len() -> usize {
    DEFAULT_MIN_SUBMIT_LEN
}
fn default_lat() -> f64 {
    DEFAULT_LAT
}
fn default_lng() -> f64 {
    DEFAULT_LNG
}
fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_radius() -> f64 {
    DEFAULT_RADIUS
}
fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},12z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=12/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            map: MapConfig::default(),
            defaults: DefaultsConfig::default(),
            url: UrlConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            min_submit_len: default_min_submit_len(),
        }
    }
}

impl SearchConfig {
    /// Debounce quiet period
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// HTTP request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            lat: default_lat(),
            lng: default_lng(),
            zoom: default_zoom(),
            radius: default_radius(),
            style: default_style(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
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
            ["search", "endpoint"] => Some(self.search.endpoint.clone()),
            ["search", "user_agent"] => Some(self.search.user_agent.clone()),
            ["search", "timeout_secs"] => Some(self.search.timeout_secs.to_string()),
            ["search", "debounce_ms"] => Some(self.search.debounce_ms.to_string()),
            ["search", "min_query_len"] => Some(self.search.min_query_len.to_string()),
            ["search", "min_submit_len"] => Some(self.search.min_submit_len.to_string()),

            ["map", "lat"] => Some(self.map.lat.to_string()),
            ["map", "lng"] => Some(self.map.lng.to_string()),
            ["map", "zoom"] => Some(self.map.zoom.to_string()),
            ["map", "radius"] => Some(self.map.radius.to_string()),
            ["map", "style"] => Some(self.map.style.clone()),

            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["search", "endpoint"] => {
                self.search.endpoint = value.trim_end_matches('/').to_string();
            }
            ["search", "user_agent"] => {
                self.search.user_agent = value.to_string();
            }
            ["search", "timeout_secs"] => {
                self.search.timeout_secs = parse_value(value, "timeout")?;
            }
            ["search", "debounce_ms"] => {
                self.search.debounce_ms = parse_value(value, "debounce")?;
            }
            ["search", "min_query_len"] => {
                self.search.min_query_len = parse_value(value, "length")?;
            }
            ["search", "min_submit_len"] => {
                self.search.min_submit_len = parse_value(value, "length")?;
            }

            ["map", "lat"] => {
                self.map.lat = parse_value(value, "latitude")?;
            }
            ["map", "lng"] => {
                self.map.lng = parse_value(value, "longitude")?;
            }
            ["map", "zoom"] => {
                self.map.zoom = parse_value(value, "zoom")?;
            }
            ["map", "radius"] => {
                let radius: f64 = parse_value(value, "radius")?;
                if radius <= 0.0 {
                    return Err(Error::Config("Radius must be positive".to_string()));
                }
                self.map.radius = radius;
            }
            ["map", "style"] => {
                value
                    .parse::<crate::map::MapStyle>()
                    .map_err(Error::Config)?;
                self.map.style = value.to_lowercase();
            }

            ["defaults", "format"] => {
                if crate::format::get_formatter(value).is_none() {
                    return Err(Error::Config(format!("Unknown format: {}", value)));
                }
                self.defaults.format = value.to_lowercase();
            }

            ["url", "default"] => {
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
            "search.endpoint",
            "search.user_agent",
            "search.timeout_secs",
            "search.debounce_ms",
            "search.min_query_len",
            "search.min_submit_len",
            "map.lat",
            "map.lng",
            "map.zoom",
            "map.radius",
            "map.style",
            "defaults.format",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}
