//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default geocoding endpoint
pub const DEFAULT_ENDPOINT: &str = crate::constants::api::NOMINATIM_URL;

/// User-Agent sent to the geocoding service
pub const DEFAULT_USER_AGENT: &str = concat!("radius-check/", env!("CARGO_PKG_VERSION"));

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Quiet period before a typed query is searched
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Minimum typed length that triggers a search
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Minimum length accepted by an explicit search
pub const DEFAULT_MIN_SUBMIT_LEN: usize = 2;

/// Initial map center latitude (Sydney)
pub const DEFAULT_LAT: f64 = -33.8688;

/// Initial map center longitude (Sydney)
pub const DEFAULT_LNG: f64 = 151.2093;

/// Initial map zoom level
pub const DEFAULT_ZOOM: u8 = 10;

/// Radius of the circle drawn around a selection, in meters
pub const DEFAULT_RADIUS: f64 = 10_000.0;

/// Default base map style
pub const DEFAULT_STYLE: &str = "standard";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "radius-check";
