use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use super::models::{ArticleRecord, NewArticle};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

const RECORD_COLUMNS: &str = "id, published_at, title, full_content, summarized_content, link, author, category, created_at";

/// SQLite-backed article store. One pooled connection, acquired per
/// operation; the table is created idempotently on connect.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    pool: SqlitePool,
}

impl ArticleRepository {
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Dedup lookup by the (title, link) business key.
    pub async fn find_by_title_and_link(
        &self,
        title: &str,
        link: &str,
    ) -> Result<Option<ArticleRecord>, StorageError> {
        let row = sqlx::query_as::<_, ArticleRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM articles WHERE title = ?1 AND link = ?2"
        ))
        .bind(title)
        .bind(link)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Unconditional insert. Callers check `find_by_title_and_link` first;
    /// the UNIQUE (title, link) constraint backs that check.
    pub async fn insert_article(&self, article: &NewArticle) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO articles (published_at, title, full_content, summarized_content, link, author, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&article.published_at)
        .bind(&article.title)
        .bind(&article.full_content)
        .bind(&article.summarized_content)
        .bind(&article.link)
        .bind(&article.author)
        .bind(article.category.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All stored articles, optionally restricted to one category.
    pub async fn list_articles(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<ArticleRecord>, StorageError> {
        let filter = category.unwrap_or("").trim().to_string();
        let rows = sqlx::query_as::<_, ArticleRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM articles
            WHERE (?1 = '' OR category = ?1)
            ORDER BY id
            "#
        ))
        .bind(filter)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Substring search over title and full content.
    pub async fn search_articles(&self, query: &str) -> Result<Vec<ArticleRecord>, StorageError> {
        let rows = sqlx::query_as::<_, ArticleRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM articles
            WHERE title LIKE '%' || ?1 || '%' OR full_content LIKE '%' || ?1 || '%'
            ORDER BY id
            "#
        ))
        .bind(query)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
