pub mod models;
pub mod repository;

pub use models::{ArticleRecord, Category, NewArticle};
pub use repository::{ArticleRepository, StorageError};
