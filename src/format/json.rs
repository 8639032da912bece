//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{LocationReport, OutputFormatter};

/// JSON formatter - outputs the full report as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON report with map scene"
    }

    fn format(&self, report: &LocationReport, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::create_test_report;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter
            .format(&create_test_report(), &Config::default())
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["query"], "123 George Street");
        assert_eq!(parsed["item"]["primary"], "123 George Street");
        assert_eq!(parsed["item"]["secondary"], "Sydney, NSW, 2000");
        assert_eq!(parsed["style"], "standard");
        assert!(parsed["scene"]["overlays"].is_array());
        assert!(parsed.get("generated_at").is_some());
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
