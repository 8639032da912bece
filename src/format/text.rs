//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{LocationReport, OutputFormatter};

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &LocationReport, _config: &Config) -> Result<String> {
        let mut output = String::new();
        let address = &report.item.address;

        output.push_str(&format!("{}\n", address.primary));
        if !address.secondary.is_empty() {
            output.push_str(&format!("{}\n", address.secondary));
        }
        output.push('\n');

        output.push_str(&format!(
            "Center: ({:.6}, {:.6})\n",
            report.item.lat, report.item.lng
        ));
        output.push_str(&format!("Radius: {}m\n", report.radius_meters));

        if let Some(viewport) = &report.scene.viewport {
            let sw = viewport.bounds.south_west;
            let ne = viewport.bounds.north_east;
            output.push_str(&format!(
                "Bounds: ({:.6}, {:.6}) to ({:.6}, {:.6})\n",
                sw.lat, sw.lng, ne.lat, ne.lng
            ));
        }

        output.push_str(&format!("Map style: {}\n", report.style));

        Ok(output)
    }
}
