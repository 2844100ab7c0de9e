use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::{GenerativeClient, RetryPolicy};

const SUMMARY_MAX_ATTEMPTS: u32 = 7;
const SUMMARY_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Produces a bulleted summary of an article body. AI failures are retried
/// with a fixed delay and then degrade to an empty summary; this component
/// never fails an ingestion run.
pub struct Summarizer {
    client: Arc<dyn GenerativeClient>,
    policy: RetryPolicy,
}

impl Summarizer {
    pub fn new(client: Arc<dyn GenerativeClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn with_default_policy(client: Arc<dyn GenerativeClient>) -> Self {
        Self::new(
            client,
            RetryPolicy::new(SUMMARY_MAX_ATTEMPTS, SUMMARY_RETRY_DELAY),
        )
    }

    pub async fn summarize(&self, body: &str) -> String {
        let prompt = build_summary_prompt(body);

        for attempt in 1..=self.policy.max_attempts {
            match self.client.generate(&prompt).await {
                Ok(text) => return text,
                Err(error) => {
                    warn!(attempt, max_attempts = self.policy.max_attempts, %error, "summarization attempt failed");
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }

        warn!("summarization retries exhausted, storing empty summary");
        String::new()
    }
}

fn build_summary_prompt(body: &str) -> String {
    format!(
        "You are a person working at a news agency or newspaper printing press, \
         your task is to summarize the given news articles in at most 100 words \
         and give it in the form of bullet points:\n\n{body}"
    )
}
