use crate::core::{ScrapeEvent, ScrapeObserver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("grant_scraper=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grant_scraper=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Forwards scrape events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScrapeObserver for TracingObserver {
    fn on_event(&self, event: &ScrapeEvent<'_>) {
        match event {
            ScrapeEvent::Fetching { url } => tracing::debug!("Fetching {}", url),
            ScrapeEvent::FetchFailed { url, error } => {
                tracing::error!("Error fetching {}: {}", url, error)
            }
            ScrapeEvent::ListingHarvested { page, links } => {
                tracing::info!("Found {} grant links on page {}", links, page)
            }
            ScrapeEvent::ListingSkipped { page, error } => {
                tracing::error!("Failed to fetch grant links for page {}: {}", page, error)
            }
            ScrapeEvent::PageCountDiscovered { total } => {
                tracing::info!("Total pages detected: {}", total)
            }
            ScrapeEvent::Pausing { page, delay } => {
                tracing::info!("Scraping page {} after {:?}", page, delay)
            }
            ScrapeEvent::DetailSkipped { url, error } => {
                tracing::warn!("Skipping grant page {}: {}", url, error)
            }
            ScrapeEvent::BatchAborted { url, error } => {
                tracing::error!("Error extracting grants info at {}: {}", url, error)
            }
            ScrapeEvent::PageCompleted { page, grants } => {
                tracing::info!("Extracted {} grants from page {}", grants, page)
            }
            ScrapeEvent::RunCompleted { grants, pages } => {
                tracing::info!("Extracted {} grants from {} pages", grants, pages)
            }
            ScrapeEvent::NothingToSave => tracing::warn!("No grants to save"),
            ScrapeEvent::Saved { path, grants } => {
                tracing::info!("Saved {} grants to {}", grants, path)
            }
            ScrapeEvent::SaveFailed { path, error } => {
                tracing::error!("Error saving grants to {}: {}", path, error)
            }
        }
    }
}
