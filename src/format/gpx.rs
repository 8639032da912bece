//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{LocationReport, OutputFormatter};

/// Points used to trace the radius circle
const RING_SEGMENTS: usize = 72;

/// GPX formatter - a waypoint for the selection and a track tracing the radius
pub struct GpxFormatter;

/// Escape text for XML element content
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint and radius track"
    }

    fn format(&self, report: &LocationReport, _config: &Config) -> Result<String> {
        let mut gpx = String::new();
        let address = &report.item.address;

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="radius-check">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>{}</name>\n", escape(&address.primary)));
        gpx.push_str(&format!(
            "    <time>{}</time>\n",
            report.generated_at.to_rfc3339()
        ));
        gpx.push_str("  </metadata>\n");

        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            report.item.lat, report.item.lng
        ));
        gpx.push('\n');
        gpx.push_str(&format!("    <name>{}</name>\n", escape(&address.primary)));
        if !address.secondary.is_empty() {
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape(&address.secondary)));
        }
        gpx.push_str("  </wpt>\n");

        for circle in report.scene.circles() {
            gpx.push_str("  <trk>\n");
            gpx.push_str(&format!(
                "    <name>{}m radius</name>\n",
                circle.radius_meters
            ));
            gpx.push_str("    <trkseg>\n");
            for point in circle.ring(RING_SEGMENTS) {
                gpx.push_str(&format!(
                    "      <trkpt lat=\"{:.6}\" lon=\"{:.6}\"/>\n",
                    point.lat, point.lng
                ));
            }
            gpx.push_str("    </trkseg>\n");
            gpx.push_str("  </trk>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
