use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The closed category set. The five named labels are the only values the
/// categorizer may produce; `Uncategorized` is the stored default for records
/// that were never classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Sports,
    Entertainment,
    Politics,
    International,
    Others,
    Uncategorized,
}

impl Category {
    /// The labels the model is allowed to answer with.
    pub const CLASSIFIABLE: [Category; 5] = [
        Category::Sports,
        Category::Entertainment,
        Category::Politics,
        Category::International,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Politics => "Politics",
            Category::International => "International",
            Category::Others => "Others",
            Category::Uncategorized => "Uncategorized",
        }
    }

    /// Exact-match parse against the classifiable labels. Anything else,
    /// including the sentinel spellings, is rejected.
    pub fn parse_label(label: &str) -> Option<Category> {
        Category::CLASSIFIABLE
            .into_iter()
            .find(|category| category.as_str() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An article about to be persisted. The (title, link) pair is the dedup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub published_at: Option<String>,
    pub title: String,
    pub full_content: String,
    pub summarized_content: String,
    pub link: String,
    pub author: String,
    pub category: Category,
}

/// A stored article row. Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArticleRecord {
    pub id: i64,
    pub published_at: Option<String>,
    pub title: String,
    pub full_content: String,
    pub summarized_content: String,
    pub link: String,
    pub author: String,
    pub category: String,
    pub created_at: String,
}
