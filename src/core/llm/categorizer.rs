use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::{GenerativeClient, RetryPolicy};
use crate::core::storage::models::Category;

const CATEGORY_MAX_ATTEMPTS: u32 = 3;
const CATEGORY_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How much of the article body accompanies the title in the prompt.
const CONTENT_EXCERPT_CHARS: usize = 500;

/// Closed-set classification with a safe default: an unrecognized answer,
/// an empty answer, or retry exhaustion all yield `Category::Others`.
pub struct Categorizer {
    client: Arc<dyn GenerativeClient>,
    policy: RetryPolicy,
}

impl Categorizer {
    pub fn new(client: Arc<dyn GenerativeClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn with_default_policy(client: Arc<dyn GenerativeClient>) -> Self {
        Self::new(
            client,
            RetryPolicy::new(CATEGORY_MAX_ATTEMPTS, CATEGORY_RETRY_DELAY),
        )
    }

    pub async fn categorize(&self, title: &str, content: &str) -> Category {
        let prompt = build_category_prompt(title, content);

        for attempt in 1..=self.policy.max_attempts {
            match self.client.generate(&prompt).await {
                Ok(answer) => {
                    let label = answer.trim();
                    return Category::parse_label(label).unwrap_or_else(|| {
                        warn!(label, "model answered outside the category set, using Others");
                        Category::Others
                    });
                }
                Err(error) => {
                    warn!(attempt, max_attempts = self.policy.max_attempts, %error, "categorization attempt failed");
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }

        warn!("categorization retries exhausted, using Others");
        Category::Others
    }
}

fn build_category_prompt(title: &str, content: &str) -> String {
    let excerpt: String = content.chars().take(CONTENT_EXCERPT_CHARS).collect();
    format!(
        "Categorize the following news article into one of these categories: \
         Sports, Entertainment, Politics, International, or Others. \
         Respond with only the category name.\n\n\
         Title: {title}\n\n\
         Content: {excerpt}..."
    )
}
