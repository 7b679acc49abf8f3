#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_LISTING_URL: &str = "https://www.grants.gov.au/Go/List";
pub const DEFAULT_ORIGIN: &str = "https://www.grants.gov.au";
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "grants_info.json";
pub const DEFAULT_MIN_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
