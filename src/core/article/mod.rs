use std::time::Duration;

use scraper::{Html, Selector};
use tracing::debug;

/// Spoofed desktop browser identification. A number of news sites answer
/// unidentified clients with 403 or a consent interstitial.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Text rendering width for the markdown-flavored body.
const BODY_WIDTH: usize = 80;

#[derive(Debug, thiserror::Error)]
pub enum ArticleFetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub body: String,
}

/// Build the HTTP client used for article fetches: short fixed timeout,
/// browser user agent.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(BROWSER_USER_AGENT)
        .build()
}

/// Fetch the raw HTML of an article page. Timeouts, transport failures and
/// non-2xx statuses are errors; the pipeline downgrades them to empty content.
pub async fn fetch_article_html(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, ArticleFetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ArticleFetchError::HttpStatus(status.as_u16()));
    }
    Ok(response.text().await?)
}

/// Best-effort conversion of raw HTML into `(title, body)`. The title comes
/// from the document's `<title>` element, the body is rendered to readable
/// markdown-flavored text. No quality contract beyond whitespace hygiene.
pub fn extract_content(html: &str, url: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);
    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|element| element.text().collect::<String>())
        })
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    let body = html2text::from_read(html.as_bytes(), BODY_WIDTH).unwrap_or_default();
    let body = remove_blank_lines(&body);
    debug!(url, title = %title, body_chars = body.chars().count(), "extracted article");

    ExtractedArticle { title, body }
}

/// Drop lines that contain only whitespace.
pub fn remove_blank_lines(content: &str) -> String {
    let mut cleaned = String::with_capacity(content.len());
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        cleaned.push_str(line);
        cleaned.push('\n');
    }
    cleaned
}
