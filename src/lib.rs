pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{GrantsGovAuLayout, LocalStorage, PageFetcher};
pub use crate::core::{
    etl::ScrapeEngine, export::GrantExporter, pipeline::GrantPipeline, scraper::GrantScraper,
    GrantRecord,
};
pub use utils::error::{Result, ScrapeError};
