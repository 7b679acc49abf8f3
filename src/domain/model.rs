use crate::utils::error::Result;
use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Label/value pairs read from one grant detail page, in the order the labels
/// first appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantRecord {
    pub fields: IndexMap<String, String>,
}

impl GrantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated label keeps its position and takes the new value.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(label.into(), value.into());
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GrantRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (label, value) in iter {
            record.insert(label, value);
        }
        record
    }
}

/// `href` of a grant detail page as it appears in the listing markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantLink(pub String);

impl GrantLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(&self, origin: &Url) -> Result<Url> {
        Ok(origin.join(&self.0)?)
    }
}

/// What one fetched listing page tells us. The page count is read even when
/// the grant entries cannot be parsed.
#[derive(Debug)]
pub struct ListingPage {
    pub page: u32,
    pub links: Result<Vec<GrantLink>>,
    pub total_pages: u32,
}

/// How a batch of detail pages reacts when one of them cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailFailurePolicy {
    /// Drop every record of the batch.
    #[default]
    AbortPage,
    /// Leave out the failing entry and keep the rest.
    SkipEntry,
}

/// Uniform random pause inserted before each listing page after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Pacing {
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }

    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_label_keeps_later_value() {
        let record: GrantRecord = [("Agency", "First"), ("Category", "Grants"), ("Agency", "Second")]
            .into_iter()
            .collect();

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Agency"), Some("Second"));
        let labels: Vec<&str> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Agency", "Category"]);
    }

    #[test]
    fn test_record_serializes_as_plain_object() {
        let record: GrantRecord = [("Agency", "Value"), ("Category", "Grants")]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Agency":"Value","Category":"Grants"}"#);
    }

    #[test]
    fn test_link_resolves_against_origin() {
        let origin = Url::parse("https://www.grants.gov.au").unwrap();

        let relative = GrantLink::new("/Go/Show?GoUuid=abc-123");
        assert_eq!(
            relative.resolve(&origin).unwrap().as_str(),
            "https://www.grants.gov.au/Go/Show?GoUuid=abc-123"
        );

        let absolute = GrantLink::new("https://other.example/Go/Show");
        assert_eq!(
            absolute.resolve(&origin).unwrap().as_str(),
            "https://other.example/Go/Show"
        );
    }

    #[test]
    fn test_pacing_stays_within_bounds() {
        let pacing = Pacing::from_millis(1000, 3000);
        for _ in 0..50 {
            let delay = pacing.sample();
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(3000));
        }
        assert_eq!(Pacing::none().sample(), Duration::ZERO);
    }
}
