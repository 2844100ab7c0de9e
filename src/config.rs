use std::path::PathBuf;

use crate::core::llm::LlmConfig;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://newsbrief.db?mode=rwc";
const DEFAULT_OPML_PATH: &str = "news-links.opml";

/// Process configuration, read once at startup from the environment
/// (after `dotenvy` has loaded any `.env` file).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub opml_path: PathBuf,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let opml_path = std::env::var("OPML_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OPML_PATH));

        Self {
            port,
            database_url,
            opml_path,
            llm: LlmConfig::from_env(),
        }
    }
}
