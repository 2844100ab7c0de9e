pub mod article;
pub mod feed;
pub mod llm;
pub mod pipeline;
pub mod storage;
pub mod subscription;
