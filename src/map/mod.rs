//! Map view controller
//!
//! Owns the map widget, the selection marker with its radius circle, and the
//! active base layer. The widget itself is reached only through [`MapWidget`].

pub mod scene;

use crate::config::MapConfig;
use crate::constants::api::{OSM_TILE_URL, SATELLITE_TILE_URL};
use crate::constants::map::{
    FIT_PADDING_PX, RADIUS_POPUP_SUFFIX, SATELLITE_MAX_ZOOM, STANDARD_MAX_ZOOM,
};
use crate::error::{Error, Result};
use crate::geo::{Bounds, Coordinates};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use scene::{MapScene, Overlay, SceneMap};

/// The location the user picked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedLocation {
    pub coords: Coordinates,
    pub label: String,
}

/// Base map style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MapStyle {
    #[default]
    Standard,
    Satellite,
}

impl MapStyle {
    /// Tile layer backing this style
    pub fn tile_layer(self) -> TileLayer {
        match self {
            Self::Standard => TileLayer {
                style: self,
                url_template: OSM_TILE_URL.to_string(),
                max_zoom: STANDARD_MAX_ZOOM,
            },
            Self::Satellite => TileLayer {
                style: self,
                url_template: SATELLITE_TILE_URL.to_string(),
                max_zoom: SATELLITE_MAX_ZOOM,
            },
        }
    }
}

impl std::fmt::Display for MapStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Satellite => write!(f, "satellite"),
        }
    }
}

impl std::str::FromStr for MapStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "street" | "osm" => Ok(Self::Standard),
            "satellite" | "imagery" => Ok(Self::Satellite),
            _ => Err(format!("Unknown map style: {}", s)),
        }
    }
}

/// A tiled base layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub style: MapStyle,
    pub url_template: String,
    pub max_zoom: u8,
}

/// Handle for an overlay added to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u64);

/// A pin with a popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Coordinates,
    pub popup: String,
}

/// Circle paint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub dash_array: String,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            color: "#059669".to_string(),
            weight: 2,
            opacity: 0.7,
            fill_color: "#10b981".to_string(),
            fill_opacity: 0.15,
            dash_array: "8, 4".to_string(),
        }
    }
}

/// A radius circle, in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Coordinates,
    pub radius_meters: f64,
    pub style: CircleStyle,
}

impl Circle {
    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.center, self.radius_meters)
    }

    /// Polygon approximating the circle edge, closed (first point repeated)
    pub fn ring(&self, segments: usize) -> Vec<Coordinates> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let bearing = 2.0 * std::f64::consts::PI * (i % segments) as f64 / segments as f64;
                self.center.offset(self.radius_meters, bearing)
            })
            .collect()
    }
}

/// Capabilities the controller needs from a map widget
pub trait MapWidget {
    /// Center the map at a zoom level
    fn set_view(&mut self, center: Coordinates, zoom: u8);

    fn add_tile_layer(&mut self, layer: &TileLayer);

    fn remove_tile_layer(&mut self, layer: &TileLayer);

    fn add_marker(&mut self, marker: Marker) -> LayerId;

    fn add_circle(&mut self, circle: Circle) -> LayerId;

    /// Remove a marker or circle
    fn remove_overlay(&mut self, id: LayerId);

    /// Move the viewport so the bounds are visible, with pixel padding
    fn fit_bounds(&mut self, bounds: Bounds, padding: (u32, u32));
}

/// Initial view and radius for a [`MapController`]
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: Coordinates,
    pub zoom: u8,
    pub radius_meters: f64,
    pub style: MapStyle,
}

impl MapSettings {
    /// Validate and convert the `[map]` config section
    pub fn from_config(config: &MapConfig) -> Result<Self> {
        let center = Coordinates::new(config.lat, config.lng);
        center.validate()?;

        if config.radius <= 0.0 {
            return Err(Error::Config("Radius must be positive".to_string()));
        }

        Ok(Self {
            center,
            zoom: config.zoom,
            radius_meters: config.radius,
            style: config.style.parse().map_err(Error::Config)?,
        })
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: Coordinates::new(
                crate::config::defaults::DEFAULT_LAT,
                crate::config::defaults::DEFAULT_LNG,
            ),
            zoom: crate::config::defaults::DEFAULT_ZOOM,
            radius_meters: crate::config::defaults::DEFAULT_RADIUS,
            style: MapStyle::Standard,
        }
    }
}

/// Owns the widget and the current selection overlays
#[derive(Debug)]
pub struct MapController<W> {
    widget: W,
    radius_meters: f64,
    style: MapStyle,
    marker: Option<LayerId>,
    circle: Option<LayerId>,
    selection: Option<SelectedLocation>,
}

impl<W: MapWidget> MapController<W> {
    /// Set the initial view and add the base layer
    pub fn new(mut widget: W, settings: &MapSettings) -> Self {
        widget.set_view(settings.center, settings.zoom);
        widget.add_tile_layer(&settings.style.tile_layer());

        Self {
            widget,
            radius_meters: settings.radius_meters,
            style: settings.style,
            marker: None,
            circle: None,
            selection: None,
        }
    }

    /// Replace any previous selection with a marker and radius circle
    pub fn show_location(&mut self, location: SelectedLocation) {
        self.clear_selection();

        let marker = Marker {
            position: location.coords,
            popup: format!("{}\n{}", location.label, RADIUS_POPUP_SUFFIX),
        };
        let circle = Circle {
            center: location.coords,
            radius_meters: self.radius_meters,
            style: CircleStyle::default(),
        };
        let bounds = circle.bounds();

        self.marker = Some(self.widget.add_marker(marker));
        self.circle = Some(self.widget.add_circle(circle));
        self.widget
            .fit_bounds(bounds, (FIT_PADDING_PX, FIT_PADDING_PX));

        debug!(label = %location.label, lat = location.coords.lat, lng = location.coords.lng, "showing location");
        self.selection = Some(location);
    }

    /// Remove the marker and circle, if any
    pub fn clear_selection(&mut self) {
        if let Some(id) = self.marker.take() {
            self.widget.remove_overlay(id);
        }
        if let Some(id) = self.circle.take() {
            self.widget.remove_overlay(id);
        }
        self.selection = None;
    }

    /// Swap the base layer
    pub fn switch_style(&mut self, style: MapStyle) {
        if style == self.style {
            return;
        }
        self.widget.remove_tile_layer(&self.style.tile_layer());
        self.widget.add_tile_layer(&style.tile_layer());
        self.style = style;
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn selection(&self) -> Option<&SelectedLocation> {
        self.selection.as_ref()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn into_widget(self) -> W {
        self.widget
    }
}
