use feed_rs::model::Entry;

use super::types::{ParsedEntry, ParsedFeed};

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("feed parse error: {0}")]
    Xml(#[from] feed_rs::parser::ParseFeedError),
}

pub fn parse_feed_bytes(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    if raw.iter().all(|byte| byte.is_ascii_whitespace()) {
        return Err(FeedParseError::EmptyPayload);
    }

    let feed = feed_rs::parser::parse(raw)?;
    let title = feed
        .title
        .as_ref()
        .map(|text| text.content.clone())
        .unwrap_or_else(|| "Untitled Feed".to_string());
    let entries = feed.entries.iter().map(entry_from_feed).collect();

    Ok(ParsedFeed { title, entries })
}

fn entry_from_feed(entry: &Entry) -> ParsedEntry {
    let title = entry
        .title
        .as_ref()
        .map(|text| text.content.clone())
        .unwrap_or_else(|| "Untitled Entry".to_string());
    let link = entry
        .links
        .first()
        .map(|entry_link| entry_link.href.clone())
        .unwrap_or_default();
    let author = entry
        .authors
        .first()
        .map(|person| person.name.trim().to_string())
        .filter(|name| !name.is_empty());
    let published_at = entry
        .published
        .or(entry.updated)
        .map(|timestamp| timestamp.to_rfc3339());

    ParsedEntry {
        title,
        link,
        author,
        published_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rss_fixture_feed() {
        let xml = include_bytes!("../../../fixtures/sample.rss.xml");
        let parsed = parse_feed_bytes(xml).expect("rss fixture must parse");

        assert_eq!(parsed.title, "Example Newsroom");
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].title, "Budget Passed");
        assert_eq!(
            parsed.entries[0].link,
            "https://news.example.com/articles/budget-passed"
        );
        assert_eq!(parsed.entries[0].author.as_deref(), Some("Ada Reporter"));
        assert!(parsed.entries[0]
            .published_at
            .as_deref()
            .expect("first entry has a date")
            .starts_with("2024-02-05"));
    }

    #[test]
    fn missing_author_and_date_become_none() {
        let xml = br#"<?xml version="1.0"?>
            <rss version="2.0">
              <channel>
                <title>Bare</title>
                <item>
                  <title>No metadata</title>
                  <link>https://bare.example/post</link>
                </item>
              </channel>
            </rss>"#;
        let parsed = parse_feed_bytes(xml).expect("feed must parse");

        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].author, None);
        assert_eq!(parsed.entries[0].published_at, None);
    }

    #[test]
    fn blank_payload_is_rejected() {
        let result = parse_feed_bytes(b"   \n ");
        assert!(matches!(result, Err(FeedParseError::EmptyPayload)));
    }
}
