use std::sync::Arc;

use tracing::{info, warn};

use crate::core::article;
use crate::core::feed::{fetch_feed, parse_feed_bytes, types::ParsedEntry};
use crate::core::llm::{Categorizer, GenerativeClient, Summarizer};
use crate::core::storage::{ArticleRepository, NewArticle, StorageError};

/// Author value stored when the feed entry names nobody.
const UNKNOWN_AUTHOR: &str = "Not mentioned";

/// Counters for one ingestion run. Failures here are per-feed or per-entry;
/// the run itself always completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionReport {
    pub feeds_processed: usize,
    pub feeds_failed: usize,
    pub entries_inserted: usize,
    pub entries_skipped: usize,
    pub entries_failed: usize,
}

/// Sequential ingestion: feed list -> per-entry dedup check -> fetch ->
/// extract -> summarize -> categorize -> persist. One feed, one entry at a
/// time, blocking on each network and AI call.
pub struct IngestionPipeline {
    repository: ArticleRepository,
    http: reqwest::Client,
    summarizer: Summarizer,
    categorizer: Categorizer,
}

impl IngestionPipeline {
    pub fn new(
        repository: ArticleRepository,
        client: Arc<dyn GenerativeClient>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            repository,
            http: article::build_http_client()?,
            summarizer: Summarizer::with_default_policy(client.clone()),
            categorizer: Categorizer::with_default_policy(client),
        })
    }

    pub fn with_components(
        repository: ArticleRepository,
        http: reqwest::Client,
        summarizer: Summarizer,
        categorizer: Categorizer,
    ) -> Self {
        Self {
            repository,
            http,
            summarizer,
            categorizer,
        }
    }

    /// Process every feed in order. Feed-level failures skip that feed and
    /// the run continues with the next one.
    pub async fn run(&self, feed_urls: &[String]) -> IngestionReport {
        let mut report = IngestionReport::default();

        for feed_url in feed_urls {
            info!(%feed_url, "processing feed");
            match self.ingest_feed(feed_url, &mut report).await {
                Ok(()) => report.feeds_processed += 1,
                Err(error) => {
                    warn!(%feed_url, %error, "feed skipped");
                    report.feeds_failed += 1;
                }
            }
        }

        info!(
            feeds = report.feeds_processed,
            inserted = report.entries_inserted,
            skipped = report.entries_skipped,
            "ingestion run finished"
        );
        report
    }

    async fn ingest_feed(
        &self,
        feed_url: &str,
        report: &mut IngestionReport,
    ) -> Result<(), FeedIngestError> {
        let raw = fetch_feed(&self.http, feed_url).await?;
        let parsed = parse_feed_bytes(&raw)?;

        for entry in &parsed.entries {
            match self.ingest_entry(entry).await {
                Ok(true) => report.entries_inserted += 1,
                Ok(false) => report.entries_skipped += 1,
                Err(error) => {
                    warn!(link = %entry.link, %error, "entry not persisted");
                    report.entries_failed += 1;
                }
            }
        }
        Ok(())
    }

    /// Returns true when a new record was inserted, false when the entry was
    /// already stored. Fetch, summarization and categorization failures all
    /// degrade; whatever fields succeeded are persisted.
    async fn ingest_entry(&self, entry: &ParsedEntry) -> Result<bool, StorageError> {
        let existing = self
            .repository
            .find_by_title_and_link(&entry.title, &entry.link)
            .await?;
        if existing.is_some() {
            info!(link = %entry.link, "already stored, skipping");
            return Ok(false);
        }

        let full_content = match article::fetch_article_html(&self.http, &entry.link).await {
            Ok(html) => article::extract_content(&html, &entry.link).body,
            Err(error) => {
                warn!(link = %entry.link, %error, "article fetch failed, continuing with empty content");
                String::new()
            }
        };

        let summarized_content = self.summarizer.summarize(&full_content).await;
        let category = self.categorizer.categorize(&entry.title, &full_content).await;

        let record = NewArticle {
            published_at: entry.published_at.clone(),
            title: entry.title.clone(),
            full_content,
            summarized_content,
            link: entry.link.clone(),
            author: entry
                .author
                .clone()
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            category,
        };
        self.repository.insert_article(&record).await?;
        info!(link = %entry.link, category = %record.category, "article stored");
        Ok(true)
    }
}

#[derive(Debug, thiserror::Error)]
enum FeedIngestError {
    #[error(transparent)]
    Fetch(#[from] crate::core::feed::FetchError),
    #[error(transparent)]
    Parse(#[from] crate::core::feed::parser::FeedParseError),
}
