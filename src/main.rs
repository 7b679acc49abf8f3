use clap::Parser;
use grant_scraper::core::ConfigProvider;
use grant_scraper::utils::logger::{self, TracingObserver};
use grant_scraper::utils::validation::Validate;
use grant_scraper::{CliConfig, GrantPipeline, LocalStorage, ScrapeEngine, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting grant-scraper");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            let config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to load config file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            run(config).await
        }
        None => run(cli).await,
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = GrantPipeline::from_config(storage, &config, Arc::new(TracingObserver))?;
    let engine = ScrapeEngine::new(pipeline);

    // A failed save is reported but does not change the exit status.
    match engine.run().await {
        Ok(output_path) => {
            println!("Grants saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Grant scrape failed: {} (Category: {:?})", e, e.category());
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e);
        }
    }

    Ok(())
}
