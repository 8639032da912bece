//! Geocoding types
//!
//! Coordinates, geocoding candidates, request shapes and the backend trait.

pub mod nominatim;

use crate::constants::geo::METERS_PER_DEGREE_LAT;
use crate::constants::search::{COUNTRY_CODE, COUNTRY_NAME};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Offset this point by a distance in meters along a bearing (radians from north)
    pub fn offset(&self, meters: f64, bearing: f64) -> Self {
        let meters_per_deg_lng = METERS_PER_DEGREE_LAT * (self.lat * PI / 180.0).cos();

        let delta_lat = (meters * bearing.cos()) / METERS_PER_DEGREE_LAT;
        let delta_lng = (meters * bearing.sin()) / meters_per_deg_lng;

        Self::new(self.lat + delta_lat, self.lng + delta_lng)
    }
}

/// A lat/lng bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    /// Smallest box containing a circle of `radius_meters` around `center`
    pub fn around(center: Coordinates, radius_meters: f64) -> Self {
        let north = center.offset(radius_meters, 0.0);
        let east = center.offset(radius_meters, PI / 2.0);
        let delta_lat = north.lat - center.lat;
        let delta_lng = east.lng - center.lng;

        Self {
            south_west: Coordinates::new(center.lat - delta_lat, center.lng - delta_lng),
            north_east: Coordinates::new(center.lat + delta_lat, center.lng + delta_lng),
        }
    }
}

/// Structured address components returned with a candidate
///
/// Any subset may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

/// One result from the geocoding service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Unique place identifier, used for deduplication
    pub place_id: u64,
    pub coords: Coordinates,
    pub display_name: String,
    #[serde(default)]
    pub address: AddressParts,
}

/// The two request shapes sent to the geocoding service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeRequest {
    /// Broad free-text search
    FreeText { query: String, limit: usize },
    /// Structured street search
    Structured { street: String, limit: usize },
}

impl GeocodeRequest {
    /// Query-string parameters for this request, in the order they are sent
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::FreeText { query, limit } => vec![
                ("q", query.clone()),
                ("countrycodes", COUNTRY_CODE.to_string()),
                ("format", "json".to_string()),
                ("limit", limit.to_string()),
                ("addressdetails", "1".to_string()),
                ("extratags", "1".to_string()),
                ("dedupe", "1".to_string()),
            ],
            Self::Structured { street, limit } => vec![
                ("street", street.clone()),
                ("country", COUNTRY_NAME.to_string()),
                ("countrycodes", COUNTRY_CODE.to_string()),
                ("format", "json".to_string()),
                ("limit", limit.to_string()),
                ("addressdetails", "1".to_string()),
            ],
        }
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Run one search request against the service
    fn search(
        &self,
        request: &GeocodeRequest,
    ) -> impl std::future::Future<Output = Result<Vec<GeocodeCandidate>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(-33.8688, 151.2093).validate().is_ok());
        assert!(Coordinates::new(-91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, 181.0).validate().is_err());
    }

    #[test]
    fn test_bounds_around_circle() {
        let center = Coordinates::new(-33.8688, 151.2093);
        let bounds = Bounds::around(center, 10_000.0);

        assert!(bounds.south_west.lat < center.lat && center.lat < bounds.north_east.lat);
        assert!(bounds.south_west.lng < center.lng && center.lng < bounds.north_east.lng);
        assert_relative_eq!(
            bounds.north_east.lat - center.lat,
            10_000.0 / METERS_PER_DEGREE_LAT,
            epsilon = 1e-9
        );
        // Longitude span widens away from the equator
        assert!(bounds.north_east.lng - center.lng > bounds.north_east.lat - center.lat);
        assert_relative_eq!(
            center.lat - bounds.south_west.lat,
            bounds.north_east.lat - center.lat,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_free_text_params() {
        let request = GeocodeRequest::FreeText {
            query: "Bondi, Australia".to_string(),
            limit: 8,
        };
        let params = request.params();
        assert!(params.contains(&("q", "Bondi, Australia".to_string())));
        assert!(params.contains(&("countrycodes", "au".to_string())));
        assert!(params.contains(&("limit", "8".to_string())));
        assert!(params.contains(&("extratags", "1".to_string())));
        assert!(params.contains(&("dedupe", "1".to_string())));
    }

    #[test]
    fn test_structured_params() {
        let request = GeocodeRequest::Structured {
            street: "123 George Street".to_string(),
            limit: 5,
        };
        let params = request.params();
        assert!(params.contains(&("street", "123 George Street".to_string())));
        assert!(params.contains(&("country", "Australia".to_string())));
        assert!(params.contains(&("limit", "5".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "q"));
    }
}
