//! Output formatting
//!
//! [`address`] builds the two-line candidate labels. The remaining modules are
//! trait-based formatters for a selected location and its map scene.

pub mod address;
pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::geo::GeocodeCandidate;
use crate::map::{MapScene, MapStyle, SelectedLocation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use address::{abbreviate_state, format_address, FormattedAddress};

/// A candidate with its display label, as shown in the result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub place_id: u64,
    pub lat: f64,
    pub lng: f64,
    #[serde(flatten)]
    pub address: FormattedAddress,
}

impl ResultItem {
    pub fn from_candidate(candidate: &GeocodeCandidate) -> Self {
        Self {
            place_id: candidate.place_id,
            lat: candidate.coords.lat,
            lng: candidate.coords.lng,
            address: format_address(candidate),
        }
    }

    /// Location handed to the map when this item is chosen
    pub fn selection(&self) -> SelectedLocation {
        SelectedLocation {
            coords: crate::geo::Coordinates::new(self.lat, self.lng),
            label: self.address.primary.clone(),
        }
    }
}

/// Everything known about one selection, ready to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationReport {
    /// Query the user typed
    pub query: String,
    pub item: ResultItem,
    pub radius_meters: f64,
    pub style: MapStyle,
    pub scene: MapScene,
    pub generated_at: DateTime<Utc>,
}

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a selected location
    ///
    /// # Arguments
    /// * `report` - The selection and its map scene
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, report: &LocationReport, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        json::JsonFormatter.info(),
        text::TextFormatter.info(),
        gpx::GpxFormatter.info(),
        url::UrlFormatter.info(),
    ]
    .into()
}

trait Describe {
    fn info(&self) -> FormatInfo;
}

impl<T: OutputFormatter> Describe for T {
    fn info(&self) -> FormatInfo {
        FormatInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::geo::{AddressParts, Coordinates};
    use crate::map::{MapController, MapSettings, SceneMap};

    pub(crate) fn create_test_report() -> LocationReport {
        let candidate = GeocodeCandidate {
            place_id: 42,
            coords: Coordinates::new(-33.8688, 151.2070),
            display_name: "123, George Street, Sydney, New South Wales, 2000, Australia"
                .to_string(),
            address: AddressParts {
                house_number: Some("123".to_string()),
                road: Some("George Street".to_string()),
                suburb: Some("Sydney".to_string()),
                state: Some("New South Wales".to_string()),
                postcode: Some("2000".to_string()),
                ..AddressParts::default()
            },
        };
        let item = ResultItem::from_candidate(&candidate);

        let settings = MapSettings::default();
        let mut map = MapController::new(SceneMap::default(), &settings);
        map.show_location(item.selection());

        LocationReport {
            query: "123 George Street".to_string(),
            item,
            radius_meters: settings.radius_meters,
            style: map.style(),
            scene: map.into_widget().scene().clone(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_result_item_label() {
        let report = create_test_report();
        assert_eq!(report.item.address.primary, "123 George Street");
        assert_eq!(report.item.address.secondary, "Sydney, NSW, 2000");
        assert_eq!(report.item.selection().label, "123 George Street");
    }

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("gpx").is_some());
        assert!(get_formatter("url").is_some());
        assert!(get_formatter("unknown").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 4);
        for format in &formats {
            assert!(get_formatter(&format.name).is_some());
        }
    }
}
