//! In-memory TF-IDF search over short documents with plus/minus queries,
//! result paging and no-result request statistics.

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod paginator;
pub mod query;
pub mod request_queue;
pub mod tokenizer;

/// Caller-assigned document id. Negative values are rejected on insert.
pub type DocId = i32;

pub use config::{EngineConfig, RequestQueueConfig, Settings};
pub use document::{DocumentStatus, ScoredDocument};
pub use engine::{DocumentFilter, SearchEngine};
pub use error::{Result, SearchError};
pub use index::InvertedIndex;
pub use paginator::{paginate, Page, Paginator};
pub use request_queue::RequestQueue;
