use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use pulldown_cmark::{html, Parser};

use crate::core::storage::ArticleRecord;

/// Presentation order for the listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Form value -> order; anything unrecognized means newest-first.
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "asc" => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

/// A stored record prepared for HTML display.
#[derive(Debug, Clone)]
pub struct ArticleView {
    pub title: String,
    pub link: String,
    pub author: String,
    pub category: String,
    pub date_display: String,
    pub content_html: String,
    pub summary_html: String,
    published_at: Option<DateTime<FixedOffset>>,
}

impl ArticleView {
    pub fn from_record(record: ArticleRecord) -> Self {
        let published_at = record
            .published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok());
        let date_display = published_at
            .map(|date| date.format("%A, %B %d, %Y %I:%M %p").to_string())
            .unwrap_or_default();

        Self {
            title: record.title,
            link: record.link,
            author: record.author,
            category: record.category,
            date_display,
            content_html: markdown_to_html(&record.full_content),
            summary_html: markdown_to_html(&record.summarized_content),
            published_at,
        }
    }
}

pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::with_capacity(markdown.len());
    html::push_html(&mut out, parser);
    out
}

/// Sort views by published date. Records without a parseable date sort last
/// in both directions.
pub fn sort_by_date(views: &mut [ArticleView], order: SortOrder) {
    views.sort_by(|a, b| match (&a.published_at, &b.published_at) {
        (Some(left), Some(right)) => match order {
            SortOrder::Ascending => left.cmp(right),
            SortOrder::Descending => right.cmp(left),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
