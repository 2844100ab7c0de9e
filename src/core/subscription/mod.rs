use std::path::Path;

/// Errors reading the OPML subscription file. These are fatal for an
/// ingestion run: without the subscription list there is nothing to do.
#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    #[error("cannot read subscription file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid OPML content: {0}")]
    Opml(String),
}

/// Load every feed URL from an OPML subscription document, in document order.
///
/// Each `outline` element with an `xmlUrl` attribute contributes one URL.
/// Duplicates across the file are preserved as-is.
pub fn load_feed_urls(path: &Path) -> Result<Vec<String>, SubscriptionError> {
    let content = std::fs::read_to_string(path)?;
    parse_opml_urls(&content)
}

pub fn parse_opml_urls(opml_content: &str) -> Result<Vec<String>, SubscriptionError> {
    let doc = roxmltree::Document::parse(opml_content)
        .map_err(|error| SubscriptionError::Opml(error.to_string()))?;
    let mut urls = Vec::new();

    for node in doc.descendants().filter(|node| node.has_tag_name("outline")) {
        let Some(feed_url) = node.attribute("xmlUrl") else {
            continue;
        };
        if feed_url.trim().is_empty() {
            continue;
        }
        urls.push(feed_url.to_string());
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixture_subscription_file() {
        let opml = include_str!("../../../fixtures/news-links.opml");
        let urls = parse_opml_urls(opml).expect("fixture opml should parse");

        assert_eq!(
            urls,
            vec![
                "https://feeds.bbci.co.uk/news/world/rss.xml".to_string(),
                "https://rss.nytimes.com/services/xml/rss/nyt/Sports.xml".to_string(),
                "https://feeds.bbci.co.uk/news/world/rss.xml".to_string(),
            ]
        );
    }

    #[test]
    fn keeps_duplicate_urls_in_document_order() {
        let opml = r#"
            <opml version="2.0">
              <body>
                <outline text="A" xmlUrl="https://a.example/feed.xml"/>
                <outline text="A again" xmlUrl="https://a.example/feed.xml"/>
              </body>
            </opml>
        "#;
        let urls = parse_opml_urls(opml).expect("opml should parse");
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], urls[1]);
    }

    #[test]
    fn skips_outlines_without_feed_url() {
        let opml = r#"
            <opml version="2.0">
              <body>
                <outline text="Folder">
                  <outline text="B" xmlUrl="https://b.example/feed.xml"/>
                </outline>
              </body>
            </opml>
        "#;
        let urls = parse_opml_urls(opml).expect("opml should parse");
        assert_eq!(urls, vec!["https://b.example/feed.xml".to_string()]);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let result = parse_opml_urls("<opml><body>");
        assert!(matches!(result, Err(SubscriptionError::Opml(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let result = load_feed_urls(&dir.path().join("absent.opml"));
        assert!(matches!(result, Err(SubscriptionError::Io(_))));
    }
}
