use crate::config::{
    DEFAULT_LISTING_URL, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS, DEFAULT_ORIGIN,
    DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_settings, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "grant-scraper")]
#[command(about = "Scrape grant announcements from grants.gov.au into a JSON file")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    #[arg(long, default_value = DEFAULT_ORIGIN, help = "Base URL grant links are resolved against")]
    pub origin: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    #[arg(long, default_value_t = DEFAULT_MIN_DELAY_MS)]
    pub min_delay_ms: u64,

    #[arg(long, default_value_t = DEFAULT_MAX_DELAY_MS)]
    pub max_delay_ms: u64,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, help = "Keep the rest of a page when one grant page cannot be read")]
    pub skip_failed_entries: bool,

    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn delay_range_ms(&self) -> (u64, u64) {
        (self.min_delay_ms, self.max_delay_ms)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn skip_failed_entries(&self) -> bool {
        self.skip_failed_entries
    }

    fn pretty_json(&self) -> bool {
        self.pretty
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_constants() {
        let config = CliConfig::parse_from(["grant-scraper"]);

        assert_eq!(config.listing_url(), "https://www.grants.gov.au/Go/List");
        assert_eq!(config.origin(), "https://www.grants.gov.au");
        assert_eq!(config.output_file(), "grants_info.json");
        assert_eq!(config.delay_range_ms(), (1000, 3000));
        assert!(!config.skip_failed_entries());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_delay_range_is_rejected() {
        let config = CliConfig::parse_from([
            "grant-scraper",
            "--min-delay-ms",
            "5000",
            "--max-delay-ms",
            "1000",
        ]);

        assert!(config.validate().is_err());
    }
}
