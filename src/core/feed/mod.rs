pub mod fetcher;
pub mod parser;
pub mod types;

pub use fetcher::{fetch_feed, FetchError};
pub use parser::parse_feed_bytes;
pub use types::{ParsedEntry, ParsedFeed};
