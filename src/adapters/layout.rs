use crate::core::{GrantLink, GrantRecord, SiteLayout};
use crate::selector;
use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html};

/// Markup of www.grants.gov.au listing and detail pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantsGovAuLayout;

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_page_number(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn normalize_label(raw: &str) -> String {
    raw.trim().trim_end_matches(':').trim_end().to_string()
}

impl SiteLayout for GrantsGovAuLayout {
    fn page_count(&self, document: &Html) -> u32 {
        let Some(pagination) = document.select(selector!("ul.pagination")).next() else {
            return 1;
        };

        pagination
            .select(selector!("a"))
            .filter_map(|link| parse_page_number(&element_text(link)))
            .max()
            .unwrap_or(1)
            .max(1)
    }

    fn grant_links(&self, document: &Html) -> Result<Vec<GrantLink>> {
        document
            .select(selector!("div.boxEQH"))
            .enumerate()
            .map(|(index, entry)| -> Result<GrantLink> {
                let inner = entry
                    .select(selector!("div.list-desc-inner"))
                    .next()
                    .ok_or_else(|| {
                        ScrapeError::parse(format!(
                            "grant entry {} has no div.list-desc-inner",
                            index + 1
                        ))
                    })?;
                let href = inner
                    .select(selector!("a.u"))
                    .next()
                    .and_then(|link| link.value().attr("href"))
                    .ok_or_else(|| {
                        ScrapeError::parse(format!("grant entry {} has no a.u link", index + 1))
                    })?;
                Ok(GrantLink::new(href))
            })
            .collect()
    }

    fn grant_fields(&self, document: &Html) -> Result<GrantRecord> {
        let mut record = GrantRecord::new();
        for block in document.select(selector!("div.list-desc")) {
            let label = block
                .select(selector!("span"))
                .next()
                .ok_or_else(|| ScrapeError::parse("description block has no label span"))?;
            let value = block
                .select(selector!("div.list-desc-inner"))
                .next()
                .ok_or_else(|| ScrapeError::parse("description block has no content element"))?;

            record.insert(
                normalize_label(&element_text(label)),
                element_text(value),
            );
        }
        Ok(record)
    }
}
