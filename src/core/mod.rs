pub mod etl;
pub mod export;
pub mod pipeline;
pub mod scraper;

pub use crate::domain::model::{DetailFailurePolicy, GrantLink, GrantRecord, ListingPage, Pacing};
pub use crate::domain::ports::{
    ConfigProvider, Pipeline, ScrapeEvent, ScrapeObserver, SiteLayout, Storage,
};
pub use crate::utils::error::Result;
