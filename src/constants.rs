//! Centralized constants for the radius-check crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Meters per degree of latitude (approximate, varies slightly with latitude)
    pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// OpenStreetMap standard tiles
    pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

    /// ArcGIS World Imagery tiles
    pub const SATELLITE_TILE_URL: &str =
        "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
}

/// Search request shaping
pub mod search {
    /// Country code filter sent with every request
    pub const COUNTRY_CODE: &str = "au";

    /// Country name used for suffixing and structured search
    pub const COUNTRY_NAME: &str = "Australia";

    /// Result cap for the free-text request
    pub const PRIMARY_LIMIT: usize = 8;

    /// Result cap for the structured fallback request
    pub const FALLBACK_LIMIT: usize = 5;

    /// The fallback request only runs when the primary returned fewer results
    pub const FALLBACK_THRESHOLD: usize = 3;
}

/// Map presentation
pub mod map {
    /// Popup text under the selected address
    pub const RADIUS_POPUP_SUFFIX: &str = "10km radius from this location";

    /// Pixel padding when fitting the viewport to the radius circle
    pub const FIT_PADDING_PX: u32 = 50;

    /// Max zoom of the OpenStreetMap tiles
    pub const STANDARD_MAX_ZOOM: u8 = 19;

    /// Max zoom of the satellite tiles
    pub const SATELLITE_MAX_ZOOM: u8 = 18;
}
