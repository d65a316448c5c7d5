//! Storage traits and error types
//!
//! This module defines the trait interface for page sinks and the record
//! they receive.

use crate::crawler::EXCERPT_CHARS;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A crawled page as handed to a sink
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    /// Body text, at most 500 characters
    pub content: String,
    /// Key of the strategy that fetched the page
    pub strategy: String,
}

impl PageRecord {
    /// Builds a record, truncating the content on a character boundary
    pub fn new(url: &str, title: Option<&str>, content: &str, strategy: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.unwrap_or_default().to_string(),
            content: content.chars().take(EXCERPT_CHARS).collect(),
            strategy: strategy.to_string(),
        }
    }
}

/// Destination for crawled pages
///
/// Implementations are shared by every worker of a crawl run, so writes
/// may arrive concurrently and in any order.
pub trait PageSink: Send + Sync {
    /// Stores one page
    fn save(&self, record: &PageRecord) -> StorageResult<()>;
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl PageSink for NoopSink {
    fn save(&self, _record: &PageRecord) -> StorageResult<()> {
        Ok(())
    }
}
