use crate::config::{
    DEFAULT_LISTING_URL, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS, DEFAULT_ORIGIN,
    DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{validate_settings, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    pub listing_url: Option<String>,
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub timeout_seconds: Option<u64>,
    pub skip_failed_entries: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PacingConfig {
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub file_name: Option<String>,
    pub pretty: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn listing_url(&self) -> &str {
        self.site.listing_url.as_deref().unwrap_or(DEFAULT_LISTING_URL)
    }

    fn origin(&self) -> &str {
        self.site.origin.as_deref().unwrap_or(DEFAULT_ORIGIN)
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_file(&self) -> &str {
        self.output.file_name.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn delay_range_ms(&self) -> (u64, u64) {
        (
            self.pacing.min_delay_ms.unwrap_or(DEFAULT_MIN_DELAY_MS),
            self.pacing.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS),
        )
    }

    fn request_timeout_secs(&self) -> u64 {
        self.fetch.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn skip_failed_entries(&self) -> bool {
        self.fetch.skip_failed_entries.unwrap_or(false)
    }

    fn pretty_json(&self) -> bool {
        self.output.pretty.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
