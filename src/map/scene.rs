//! Scene-recording map widget
//!
//! Applies widget calls to a plain serializable [`MapScene`], which the output
//! formatters render.

use crate::geo::{Bounds, Coordinates};
use crate::map::{Circle, LayerId, MapWidget, Marker, TileLayer};
use serde::{Deserialize, Serialize};

/// An overlay drawn over the base layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    Marker(Marker),
    Circle(Circle),
}

/// Last viewport fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: Bounds,
    pub padding: (u32, u32),
}

/// Snapshot of everything on the map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapScene {
    pub center: Option<Coordinates>,
    pub zoom: Option<u8>,
    pub tile_layers: Vec<TileLayer>,
    pub overlays: Vec<(LayerId, Overlay)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl MapScene {
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.overlays.iter().filter_map(|(_, overlay)| match overlay {
            Overlay::Marker(marker) => Some(marker),
            Overlay::Circle(_) => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.overlays.iter().filter_map(|(_, overlay)| match overlay {
            Overlay::Circle(circle) => Some(circle),
            Overlay::Marker(_) => None,
        })
    }
}

/// [`MapWidget`] that records into a [`MapScene`]
#[derive(Debug, Default)]
pub struct SceneMap {
    scene: MapScene,
    next_id: u64,
}

impl SceneMap {
    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    fn add_overlay(&mut self, overlay: Overlay) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.scene.overlays.push((id, overlay));
        id
    }
}

impl MapWidget for SceneMap {
    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.scene.center = Some(center);
        self.scene.zoom = Some(zoom);
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        if !self.scene.tile_layers.contains(layer) {
            self.scene.tile_layers.push(layer.clone());
        }
    }

    fn remove_tile_layer(&mut self, layer: &TileLayer) {
        self.scene.tile_layers.retain(|l| l != layer);
    }

    fn add_marker(&mut self, marker: Marker) -> LayerId {
        self.add_overlay(Overlay::Marker(marker))
    }

    fn add_circle(&mut self, circle: Circle) -> LayerId {
        self.add_overlay(Overlay::Circle(circle))
    }

    fn remove_overlay(&mut self, id: LayerId) {
        self.scene.overlays.retain(|(existing, _)| *existing != id);
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: (u32, u32)) {
        self.scene.center = Some(Coordinates::new(
            (bounds.south_west.lat + bounds.north_east.lat) / 2.0,
            (bounds.south_west.lng + bounds.north_east.lng) / 2.0,
        ));
        self.scene.viewport = Some(Viewport { bounds, padding });
    }
}
