use std::path::PathBuf;
use std::sync::Arc;

use askama::Template;
use axum::extract::{Form, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use tracing::error;

use crate::core::pipeline::IngestionPipeline;
use crate::core::storage::ArticleRepository;
use crate::core::subscription;

use super::render::{sort_by_date, ArticleView, SortOrder};

/// Category choices offered by the listing filter.
const FILTER_CATEGORIES: [&str; 6] = [
    "All",
    "Sports",
    "Entertainment",
    "Politics",
    "International",
    "Others",
];

pub struct AppState {
    pub repository: ArticleRepository,
    pub pipeline: Arc<IngestionPipeline>,
    pub opml_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingForm {
    pub sortorder: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    articles: Vec<ArticleView>,
    categories: Vec<String>,
    selected_category: String,
    sort_order: String,
}

#[derive(Template)]
#[template(path = "search_results.html")]
struct SearchTemplate {
    query: String,
    results: Vec<ArticleView>,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    render_listing(&state, "desc", "All").await
}

pub async fn index_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ListingForm>,
) -> Html<String> {
    let sort_order = form.sortorder.unwrap_or_else(|| "desc".to_string());
    let category = form.category.unwrap_or_else(|| "All".to_string());
    render_listing(&state, &sort_order, &category).await
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let query = params.query.unwrap_or_default();
    // A failing store read degrades to an empty page, never an error page.
    let records = match state.repository.search_articles(&query).await {
        Ok(rows) => rows,
        Err(error) => {
            error!(%error, "search query failed, returning no results");
            Vec::new()
        }
    };
    let mut results: Vec<ArticleView> = records.into_iter().map(ArticleView::from_record).collect();
    sort_by_date(&mut results, SortOrder::Descending);

    render_template(SearchTemplate { query, results })
}

/// Trigger a full ingestion run over all subscribed feeds, then go back to
/// the listing. A missing or malformed subscription file aborts the run;
/// the server itself stays up.
pub async fn summarize(State(state): State<Arc<AppState>>) -> Redirect {
    match subscription::load_feed_urls(&state.opml_path) {
        Ok(feed_urls) => {
            state.pipeline.run(&feed_urls).await;
        }
        Err(error) => {
            error!(%error, "subscription file unavailable, ingestion run aborted");
        }
    }
    Redirect::to("/")
}

async fn render_listing(state: &AppState, sort_order: &str, category: &str) -> Html<String> {
    let filter = Some(category).filter(|&value| value != "All");
    let records = match state.repository.list_articles(filter).await {
        Ok(rows) => rows,
        Err(error) => {
            error!(%error, "listing query failed, returning no results");
            Vec::new()
        }
    };

    let mut articles: Vec<ArticleView> = records.into_iter().map(ArticleView::from_record).collect();
    sort_by_date(&mut articles, SortOrder::from_form_value(sort_order));

    render_template(IndexTemplate {
        articles,
        categories: FILTER_CATEGORIES.iter().map(ToString::to_string).collect(),
        selected_category: category.to_string(),
        sort_order: sort_order.to_string(),
    })
}

fn render_template<T: Template>(template: T) -> Html<String> {
    Html(template.render().unwrap_or_else(|error| {
        error!(%error, "template rendering failed");
        String::new()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::llm::test_support::FlakyClient;
    use crate::core::storage::{Category, NewArticle};

    async fn state_with_articles(articles: &[NewArticle]) -> Arc<AppState> {
        let repository = ArticleRepository::connect("sqlite::memory:")
            .await
            .expect("connect must succeed");
        for article in articles {
            repository
                .insert_article(article)
                .await
                .expect("insert must succeed");
        }
        let client = Arc::new(FlakyClient::new(0, "Others"));
        let pipeline = Arc::new(
            IngestionPipeline::new(repository.clone(), client).expect("pipeline should build"),
        );
        Arc::new(AppState {
            repository,
            pipeline,
            opml_path: PathBuf::from("does-not-exist.opml"),
        })
    }

    fn article(title: &str, category: Category, published_at: &str) -> NewArticle {
        NewArticle {
            published_at: Some(published_at.to_string()),
            title: title.to_string(),
            full_content: format!("body of {title}"),
            summarized_content: "- a point".to_string(),
            link: format!("https://news.example.com/{title}"),
            author: "Ada Reporter".to_string(),
            category,
        }
    }

    #[tokio::test]
    async fn listing_applies_category_filter_and_sort_order() {
        let state = state_with_articles(&[
            article("Budget Passed", Category::Politics, "2024-02-05T09:30:00+00:00"),
            article("Olympics Begin", Category::Sports, "2024-02-06T18:00:00+00:00"),
        ])
        .await;

        let Html(all_desc) = index_submit(
            State(state.clone()),
            Form(ListingForm {
                sortorder: Some("desc".to_string()),
                category: Some("All".to_string()),
            }),
        )
        .await;
        let olympics = all_desc.find("Olympics Begin").expect("olympics listed");
        let budget = all_desc.find("Budget Passed").expect("budget listed");
        assert!(olympics < budget, "newest article should come first");

        let Html(sports_only) = index_submit(
            State(state),
            Form(ListingForm {
                sortorder: None,
                category: Some("Sports".to_string()),
            }),
        )
        .await;
        assert!(sports_only.contains("Olympics Begin"));
        assert!(!sports_only.contains("Budget Passed"));
    }

    #[tokio::test]
    async fn plain_get_renders_the_full_listing() {
        let state = state_with_articles(&[article(
            "Budget Passed",
            Category::Politics,
            "2024-02-05T09:30:00+00:00",
        )])
        .await;

        let Html(page) = index(State(state)).await;
        assert!(page.contains("Budget Passed"));
        assert!(page.contains("<li>a point</li>"));
    }

    #[tokio::test]
    async fn search_matches_substrings_in_titles() {
        let state = state_with_articles(&[
            article("Budget Passed", Category::Politics, "2024-02-05T09:30:00+00:00"),
            article("Olympics Begin", Category::Sports, "2024-02-06T18:00:00+00:00"),
        ])
        .await;

        let Html(page) = search(
            State(state),
            Query(SearchParams {
                query: Some("Olympic".to_string()),
            }),
        )
        .await;
        assert!(page.contains("Olympics Begin"));
        assert!(!page.contains("Budget Passed"));
    }

    #[tokio::test]
    async fn summarize_with_missing_subscription_file_still_redirects() {
        let state = state_with_articles(&[]).await;
        let _redirect = summarize(State(state.clone())).await;

        let stored = state
            .repository
            .list_articles(None)
            .await
            .expect("list must succeed");
        assert!(stored.is_empty());
    }
}
