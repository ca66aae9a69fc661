//! Recently-selected result storage.

pub mod memory;

pub use memory::MemoryRecentsManager;

use async_trait::async_trait;

use crate::search::provider::ProviderError;
use crate::search::types::SearchResult;

/// Store of previously chosen results, most-recent-first. Capacity bounded;
/// saving an already-known id moves it to the front.
#[async_trait]
pub trait RecentsManager: Send + Sync {
    /// Case-insensitive substring match of `term` against each entry's
    /// combined "name context" text, most recent first.
    async fn query(&self, term: &str) -> Result<Vec<SearchResult>, ProviderError>;

    /// Look up the stored entries for exactly these ids, most recent first.
    /// Unknown ids are simply absent from the answer.
    async fn query_by_id(&self, ids: &[String]) -> Result<Vec<SearchResult>, ProviderError>;

    /// The `count` most recently saved entries, most recent first.
    async fn last(&self, count: usize) -> Result<Vec<SearchResult>, ProviderError>;

    /// Record a selection. A new id may evict the oldest entry; a known id
    /// is replaced and promoted to most recent.
    async fn save_recent(&self, result: &SearchResult) -> Result<(), ProviderError>;

    /// Overwrite the stored fields for an id without touching its recency.
    /// Unknown ids are ignored.
    async fn update_recent(&self, result: &SearchResult) -> Result<(), ProviderError>;
}
