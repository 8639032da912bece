//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{LocationReport, OutputFormatter};

/// URL formatter - outputs a map URL centered on the selection
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        report: &LocationReport,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        config.format_url(provider, report.item.lat, report.item.lng)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the selected location"
    }

    fn format(&self, report: &LocationReport, config: &Config) -> Result<String> {
        self.format_with_provider(report, config, None)
    }
}
