use crate::adapters::PageFetcher;
use crate::core::{
    ConfigProvider, DetailFailurePolicy, GrantLink, GrantRecord, ListingPage, Pacing,
    ScrapeEvent, ScrapeObserver, SiteLayout,
};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Walks the paginated listing and turns every grant detail page into a record.
pub struct GrantScraper {
    fetcher: PageFetcher,
    layout: Box<dyn SiteLayout>,
    observer: Arc<dyn ScrapeObserver>,
    listing_url: Url,
    origin: Url,
    pacing: Pacing,
    policy: DetailFailurePolicy,
}

impl GrantScraper {
    pub fn new(
        fetcher: PageFetcher,
        layout: Box<dyn SiteLayout>,
        observer: Arc<dyn ScrapeObserver>,
        listing_url: Url,
        origin: Url,
    ) -> Self {
        Self {
            fetcher,
            layout,
            observer,
            listing_url,
            origin,
            pacing: Pacing::from_millis(1000, 3000),
            policy: DetailFailurePolicy::default(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(
        config: &C,
        layout: Box<dyn SiteLayout>,
        observer: Arc<dyn ScrapeObserver>,
    ) -> Result<Self> {
        let fetcher = PageFetcher::new(
            Duration::from_secs(config.request_timeout_secs()),
            observer.clone(),
        )?;
        let (min_delay, max_delay) = config.delay_range_ms();
        let policy = if config.skip_failed_entries() {
            DetailFailurePolicy::SkipEntry
        } else {
            DetailFailurePolicy::AbortPage
        };

        Ok(Self::new(
            fetcher,
            layout,
            observer,
            Url::parse(config.listing_url())?,
            Url::parse(config.origin())?,
        )
        .with_pacing(Pacing::from_millis(min_delay, max_delay))
        .with_policy(policy))
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_policy(mut self, policy: DetailFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Highest page number advertised by the first listing page.
    pub async fn discover_page_count(&self) -> Result<u32> {
        let document = self.fetcher.fetch_document(&self.listing_url, &[]).await?;
        Ok(self.layout.page_count(&document))
    }

    /// Detail links of one listing page. `None` requests the listing without a
    /// page parameter.
    pub async fn harvest_links(&self, page: Option<u32>) -> Result<Vec<GrantLink>> {
        self.fetch_listing(page).await?.links
    }

    /// Records for `links`, in order. Under `AbortPage` the first failing entry
    /// discards the whole batch.
    pub async fn extract_details(&self, links: &[GrantLink]) -> Result<Vec<GrantRecord>> {
        let mut grants = Vec::with_capacity(links.len());
        for link in links {
            match self.fetch_grant(link).await {
                Ok(grant) => grants.push(grant),
                Err(error) => {
                    let url = link
                        .resolve(&self.origin)
                        .map(String::from)
                        .unwrap_or_else(|_| link.as_str().to_string());
                    match self.policy {
                        DetailFailurePolicy::AbortPage => {
                            self.observer
                                .on_event(&ScrapeEvent::BatchAborted { url: &url, error: &error });
                            return Err(error);
                        }
                        DetailFailurePolicy::SkipEntry => {
                            self.observer
                                .on_event(&ScrapeEvent::DetailSkipped { url: &url, error: &error });
                        }
                    }
                }
            }
        }
        Ok(grants)
    }

    /// Visits every listing page in ascending order. A page whose links or
    /// details cannot be read is logged and skipped; page 1 still supplies the
    /// page count when only its grant entries are malformed.
    pub async fn scrape_all_pages(&self) -> Vec<GrantRecord> {
        let mut total_grants = Vec::new();

        let total_pages = match self.fetch_listing(Some(1)).await {
            Ok(listing) => {
                let total_pages = listing.total_pages;
                self.collect_page(listing, &mut total_grants).await;
                total_pages
            }
            Err(error) => {
                self.observer
                    .on_event(&ScrapeEvent::ListingSkipped { page: 1, error: &error });
                1
            }
        };
        self.observer
            .on_event(&ScrapeEvent::PageCountDiscovered { total: total_pages });

        for page in 2..=total_pages {
            let delay = self.pacing.sample();
            self.observer.on_event(&ScrapeEvent::Pausing { page, delay });
            tokio::time::sleep(delay).await;

            match self.fetch_listing(Some(page)).await {
                Ok(listing) => self.collect_page(listing, &mut total_grants).await,
                Err(error) => {
                    self.observer
                        .on_event(&ScrapeEvent::ListingSkipped { page, error: &error });
                }
            }
        }

        self.observer.on_event(&ScrapeEvent::RunCompleted {
            grants: total_grants.len(),
            pages: total_pages,
        });
        total_grants
    }

    async fn collect_page(&self, listing: ListingPage, total_grants: &mut Vec<GrantRecord>) {
        let links = match listing.links {
            Ok(links) => links,
            Err(error) => {
                self.observer.on_event(&ScrapeEvent::ListingSkipped {
                    page: listing.page,
                    error: &error,
                });
                return;
            }
        };

        // The batch failure was already reported by extract_details.
        if let Ok(grants) = self.extract_details(&links).await {
            self.observer.on_event(&ScrapeEvent::PageCompleted {
                page: listing.page,
                grants: grants.len(),
            });
            total_grants.extend(grants);
        }
    }

    async fn fetch_listing(&self, page: Option<u32>) -> Result<ListingPage> {
        let query: Vec<(&str, String)> = page
            .map(|page| vec![("page", page.to_string())])
            .unwrap_or_default();

        let document = self.fetcher.fetch_document(&self.listing_url, &query).await?;
        let links = self.layout.grant_links(&document);
        let total_pages = self.layout.page_count(&document);

        let page = page.unwrap_or(1);
        if let Ok(links) = &links {
            self.observer.on_event(&ScrapeEvent::ListingHarvested {
                page,
                links: links.len(),
            });
        }
        Ok(ListingPage {
            page,
            links,
            total_pages,
        })
    }

    async fn fetch_grant(&self, link: &GrantLink) -> Result<GrantRecord> {
        let url = link.resolve(&self.origin)?;
        let document = self.fetcher.fetch_document(&url, &[]).await?;
        self.layout.grant_fields(&document)
    }
}
