use crate::domain::model::{GrantLink, GrantRecord};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use scraper::Html;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Where `path` ends up, for log lines and the run summary.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_url(&self) -> &str;
    fn origin(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn delay_range_ms(&self) -> (u64, u64);
    fn request_timeout_secs(&self) -> u64;
    fn skip_failed_entries(&self) -> bool;
    fn pretty_json(&self) -> bool;
}

/// The markup contract with the origin site. Swapping the site layout only
/// means swapping this implementation.
pub trait SiteLayout: Send + Sync {
    /// Highest page number in the pagination control, 1 when there is none.
    fn page_count(&self, document: &Html) -> u32;
    /// Detail links of every grant entry, in document order.
    fn grant_links(&self, document: &Html) -> Result<Vec<GrantLink>>;
    /// Labelled fields of a grant detail page.
    fn grant_fields(&self, document: &Html) -> Result<GrantRecord>;
}

#[derive(Debug)]
pub enum ScrapeEvent<'a> {
    Fetching { url: &'a str },
    FetchFailed { url: &'a str, error: &'a ScrapeError },
    ListingHarvested { page: u32, links: usize },
    ListingSkipped { page: u32, error: &'a ScrapeError },
    PageCountDiscovered { total: u32 },
    Pausing { page: u32, delay: Duration },
    DetailSkipped { url: &'a str, error: &'a ScrapeError },
    BatchAborted { url: &'a str, error: &'a ScrapeError },
    PageCompleted { page: u32, grants: usize },
    RunCompleted { grants: usize, pages: u32 },
    NothingToSave,
    Saved { path: &'a str, grants: usize },
    SaveFailed { path: &'a str, error: &'a ScrapeError },
}

pub trait ScrapeObserver: Send + Sync {
    fn on_event(&self, event: &ScrapeEvent<'_>);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<GrantRecord>>;
    async fn load(&self, records: Vec<GrantRecord>) -> Result<String>;
}
