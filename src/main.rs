use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsbrief::config::AppConfig;
use newsbrief::core::llm::{validate_config, GeminiClient};
use newsbrief::core::pipeline::IngestionPipeline;
use newsbrief::core::storage::ArticleRepository;
use newsbrief::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsbrief=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    if let Err(error) = validate_config(&config.llm) {
        // The server still works without a key; summaries degrade to empty
        // and categories to the default.
        warn!(%error, "AI service not fully configured");
    }

    let repository = ArticleRepository::connect(&config.database_url).await?;
    let client = Arc::new(GeminiClient::new(config.llm.clone())?);
    let pipeline = Arc::new(IngestionPipeline::new(repository.clone(), client)?);

    let state = AppState {
        repository,
        pipeline,
        opml_path: config.opml_path.clone(),
    };
    web::serve(state, config.port).await?;
    Ok(())
}
