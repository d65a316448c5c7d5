//! Storage module for persisting crawled pages
//!
//! Persistence is optional. When a database path is configured every
//! successfully fetched page is written to SQLite; otherwise pages go to a
//! [`NoopSink`]. Sinks are fire-and-forget from the crawler's point of view:
//! a failed write is logged and the crawl carries on.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteSink;
pub use traits::{NoopSink, PageRecord, PageSink, StorageError, StorageResult};

use std::path::Path;
use std::sync::Arc;

/// Opens the sink for an optional database path
///
/// # Returns
///
/// * `Ok(Arc<dyn PageSink>)` - SQLite sink when a path is given, no-op sink otherwise
/// * `Err(StorageError)` - The database could not be opened
pub fn open_sink(path: Option<&Path>) -> StorageResult<Arc<dyn PageSink>> {
    match path {
        Some(path) => {
            tracing::info!("Persisting crawled pages to {}", path.display());
            Ok(Arc::new(SqliteSink::open(path)?))
        }
        None => Ok(Arc::new(NoopSink)),
    }
}
