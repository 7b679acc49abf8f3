use crate::adapters::GrantsGovAuLayout;
use crate::core::{
    export::GrantExporter, scraper::GrantScraper, ConfigProvider, GrantRecord, Pipeline,
    ScrapeObserver, Storage,
};
use crate::utils::error::{Result, ScrapeError};
use std::sync::Arc;

/// Scrapes the whole listing, then writes one JSON file through `S`.
pub struct GrantPipeline<S: Storage> {
    scraper: GrantScraper,
    exporter: GrantExporter<S>,
    output_file: String,
}

impl<S: Storage> GrantPipeline<S> {
    pub fn new(scraper: GrantScraper, exporter: GrantExporter<S>, output_file: String) -> Self {
        Self {
            scraper,
            exporter,
            output_file,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(
        storage: S,
        config: &C,
        observer: Arc<dyn ScrapeObserver>,
    ) -> Result<Self> {
        let scraper = GrantScraper::from_config(config, Box::new(GrantsGovAuLayout), observer.clone())?;
        let exporter = GrantExporter::new(storage, observer).pretty(config.pretty_json());
        Ok(Self::new(scraper, exporter, config.output_file().to_string()))
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for GrantPipeline<S> {
    async fn extract(&self) -> Result<Vec<GrantRecord>> {
        Ok(self.scraper.scrape_all_pages().await)
    }

    async fn load(&self, records: Vec<GrantRecord>) -> Result<String> {
        if self.exporter.save(&records, &self.output_file).await {
            Ok(self.exporter.location(&self.output_file))
        } else {
            Err(ScrapeError::PersistError {
                path: self.exporter.location(&self.output_file),
            })
        }
    }
}
