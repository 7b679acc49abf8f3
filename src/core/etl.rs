use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract then load and returns where the grants were written.
    pub async fn run(&self) -> Result<String> {
        tracing::debug!("Starting grant scrape...");

        let grants = self.pipeline.extract().await?;
        tracing::debug!("Collected {} grants", grants.len());

        let output_path = self.pipeline.load(grants).await?;
        tracing::debug!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GrantRecord;
    use crate::utils::error::ScrapeError;
    use std::sync::Mutex;

    struct MockPipeline {
        grants: Vec<GrantRecord>,
        loaded: Mutex<Option<usize>>,
    }

    impl MockPipeline {
        fn new(grants: Vec<GrantRecord>) -> Self {
            Self {
                grants,
                loaded: Mutex::new(None),
            }
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for MockPipeline {
        async fn extract(&self) -> Result<Vec<GrantRecord>> {
            Ok(self.grants.clone())
        }

        async fn load(&self, records: Vec<GrantRecord>) -> Result<String> {
            if records.is_empty() {
                return Err(ScrapeError::PersistError {
                    path: "mock.json".to_string(),
                });
            }
            *self.loaded.lock().unwrap() = Some(records.len());
            Ok("mock.json".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_hands_extracted_grants_to_load() {
        let grants = vec![
            [("Agency", "Health")].into_iter().collect(),
            [("Agency", "Finance")].into_iter().collect(),
        ];
        let engine = ScrapeEngine::new(MockPipeline::new(grants));

        assert_eq!(engine.run().await.unwrap(), "mock.json");
        assert_eq!(*engine.pipeline.loaded.lock().unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_run_surfaces_load_failure() {
        let engine = ScrapeEngine::new(MockPipeline::new(Vec::new()));

        let error = engine.run().await.unwrap_err();
        assert!(matches!(error, ScrapeError::PersistError { .. }));
    }
}
