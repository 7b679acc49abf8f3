use crate::core::{ScrapeEvent, ScrapeObserver};
use crate::utils::error::{Result, ScrapeError};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

/// HTTP session shared by every request of a run.
pub struct PageFetcher {
    client: Client,
    observer: Arc<dyn ScrapeObserver>,
}

impl PageFetcher {
    pub fn new(timeout: Duration, observer: Arc<dyn ScrapeObserver>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, observer })
    }

    /// GETs `url` and parses the body. Network errors, timeouts and non-2xx
    /// statuses are reported to the observer and returned as fetch errors.
    pub async fn fetch_document(&self, url: &Url, query: &[(&str, String)]) -> Result<Html> {
        self.observer.on_event(&ScrapeEvent::Fetching {
            url: url.as_str(),
        });

        match self.fetch_text(url, query).await {
            Ok(body) => Ok(Html::parse_document(&body)),
            Err(error) => {
                self.observer.on_event(&ScrapeEvent::FetchFailed {
                    url: url.as_str(),
                    error: &error,
                });
                Err(error)
            }
        }
    }

    async fn fetch_text(&self, url: &Url, query: &[(&str, String)]) -> Result<String> {
        let fetch_error = |source| ScrapeError::FetchError {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(fetch_error)?;

        tracing::debug!("Response status for {}: {}", url, response.status());

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatusError {
                url: response.url().to_string(),
                status,
            });
        }

        response.text().await.map_err(fetch_error)
    }
}
