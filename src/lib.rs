//! radius-check: Australian address lookup
//!
//! A library and CLI tool that geocodes free-form Australian addresses through
//! a Nominatim-compatible service and centres a map on the chosen result with
//! a 10 km radius circle.
//!
//! ## Features
//!
//! - Query normalisation with a structured street fallback
//! - Two-line address labels with abbreviated state names
//! - Debounced search session with keyboard navigation
//! - Map controller that draws a marker and radius circle
//! - CLI with text, JSON, GPX and URL output
//!
//! ## Quick Start
//!
//! ```rust
//! use radius_check::map::{MapController, MapSettings, SceneMap, SelectedLocation};
//! use radius_check::geo::Coordinates;
//!
//! let mut map = MapController::new(SceneMap::default(), &MapSettings::default());
//! map.show_location(SelectedLocation {
//!     coords: Coordinates::new(-33.8688, 151.2093),
//!     label: "Sydney".to_string(),
//! });
//!
//! let scene = map.widget().scene();
//! assert_eq!(scene.markers().count(), 1);
//! assert_eq!(scene.circles().count(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod map;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use format::{format_address, FormattedAddress, ResultItem};
pub use geo::{Coordinates, GeocodeCandidate};
pub use search::{GeocodeClient, SearchQuery};
pub use session::{Session, SessionEvent};
