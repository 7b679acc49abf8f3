use crate::core::{GrantRecord, ScrapeEvent, ScrapeObserver, Storage};
use crate::utils::error::Result;
use std::sync::Arc;

/// Writes the collected grants as one JSON array.
pub struct GrantExporter<S: Storage> {
    storage: S,
    observer: Arc<dyn ScrapeObserver>,
    pretty: bool,
}

impl<S: Storage> GrantExporter<S> {
    pub fn new(storage: S, observer: Arc<dyn ScrapeObserver>) -> Self {
        Self {
            storage,
            observer,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn location(&self, file_name: &str) -> String {
        self.storage.location(file_name)
    }

    /// Returns `false` without touching storage when there is nothing to save,
    /// and `false` when serialization or the write fails.
    pub async fn save(&self, grants: &[GrantRecord], file_name: &str) -> bool {
        if grants.is_empty() {
            self.observer.on_event(&ScrapeEvent::NothingToSave);
            return false;
        }

        let path = self.storage.location(file_name);
        match self.write_json(grants, file_name).await {
            Ok(()) => {
                self.observer.on_event(&ScrapeEvent::Saved {
                    path: &path,
                    grants: grants.len(),
                });
                true
            }
            Err(error) => {
                self.observer.on_event(&ScrapeEvent::SaveFailed {
                    path: &path,
                    error: &error,
                });
                false
            }
        }
    }

    async fn write_json(&self, grants: &[GrantRecord], file_name: &str) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_vec_pretty(grants)?
        } else {
            serde_json::to_vec(grants)?
        };

        tracing::debug!("Writing {} bytes of grant data", json.len());
        self.storage.write_file(file_name, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalStorage;
    use crate::utils::error::ScrapeError;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl ScrapeObserver for RecordingObserver {
        fn on_event(&self, event: &ScrapeEvent<'_>) {
            self.events.lock().unwrap().push(format!("{:?}", event));
        }
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        async fn write_file(&self, _path: &str, _data: &[u8]) -> Result<()> {
            Err(ScrapeError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only volume",
            )))
        }

        fn location(&self, path: &str) -> String {
            format!("readonly://{}", path)
        }
    }

    fn sample_grants() -> Vec<GrantRecord> {
        vec![
            [("Agency", "Department of Health"), ("GO ID", "GO1001")]
                .into_iter()
                .collect(),
            [("Category", "Grants"), ("Agency", "Department of Finance")]
                .into_iter()
                .collect(),
            [("GO ID", "GO1003")].into_iter().collect(),
        ]
    }

    fn local_exporter(temp_dir: &TempDir, observer: Arc<RecordingObserver>) -> GrantExporter<LocalStorage> {
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        GrantExporter::new(storage, observer)
    }

    #[tokio::test]
    async fn test_save_empty_collection_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let observer = Arc::new(RecordingObserver::default());
        let exporter = local_exporter(&temp_dir, observer.clone());

        assert!(!exporter.save(&[], "grants_info.json").await);
        assert!(!temp_dir.path().join("grants_info.json").exists());

        let events = observer.events.lock().unwrap();
        assert_eq!(events.as_slice(), ["NothingToSave"]);
    }

    #[tokio::test]
    async fn test_save_round_trips_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = local_exporter(&temp_dir, Arc::new(RecordingObserver::default()));
        let grants = sample_grants();

        assert!(exporter.save(&grants, "grants_info.json").await);

        let written = std::fs::read(temp_dir.path().join("grants_info.json")).unwrap();
        let parsed: Vec<GrantRecord> = serde_json::from_slice(&written).unwrap();
        assert_eq!(parsed, grants);

        let second_keys: Vec<&str> = parsed[1].fields.keys().map(String::as_str).collect();
        assert_eq!(second_keys, vec!["Category", "Agency"]);
    }

    #[tokio::test]
    async fn test_save_pretty_output() {
        let temp_dir = TempDir::new().unwrap();
        let exporter =
            local_exporter(&temp_dir, Arc::new(RecordingObserver::default())).pretty(true);

        assert!(exporter.save(&sample_grants(), "grants_info.json").await);

        let written =
            std::fs::read_to_string(temp_dir.path().join("grants_info.json")).unwrap();
        assert!(written.starts_with("[\n"));
        assert!(written.contains("\"Agency\": \"Department of Health\""));
    }

    #[tokio::test]
    async fn test_save_reports_write_failure() {
        let observer = Arc::new(RecordingObserver::default());
        let exporter = GrantExporter::new(FailingStorage, observer.clone());

        assert!(!exporter.save(&sample_grants(), "grants_info.json").await);

        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].starts_with("SaveFailed"));
        assert!(events[0].contains("readonly://grants_info.json"));
    }
}
