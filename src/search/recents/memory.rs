use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::search::provider::ProviderError;
use crate::search::recents::RecentsManager;
use crate::search::types::SearchResult;

const CAPACITY: usize = 100;

#[derive(Debug, Clone)]
struct RecentEntry {
    result: SearchResult,
    saved_at: DateTime<Utc>,
}

/// In-process recents store. Entries live in one mutex-guarded vec kept in
/// save order, oldest first.
pub struct MemoryRecentsManager {
    entries: Mutex<Vec<RecentEntry>>,
}

impl MemoryRecentsManager {
    pub fn new() -> Self {
        MemoryRecentsManager {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryRecentsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecentsManager for MemoryRecentsManager {
    async fn query(&self, term: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let needle = term.to_lowercase();
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| {
                format!("{} {}", e.result.name, e.result.context)
                    .to_lowercase()
                    .contains(&needle)
            })
            .map(|e| e.result.clone())
            .collect())
    }

    async fn query_by_id(&self, ids: &[String]) -> Result<Vec<SearchResult>, ProviderError> {
        let entries = self.entries.lock().await;
        let mut hits: Vec<&RecentEntry> =
            entries.iter().filter(|e| ids.contains(&e.result.id)).collect();
        hits.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(hits.into_iter().map(|e| e.result.clone()).collect())
    }

    async fn last(&self, count: usize) -> Result<Vec<SearchResult>, ProviderError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .rev()
            .take(count)
            .map(|e| e.result.clone())
            .collect())
    }

    async fn save_recent(&self, result: &SearchResult) -> Result<(), ProviderError> {
        let mut entries = self.entries.lock().await;
        entries.retain(|e| e.result.id != result.id);
        if entries.len() >= CAPACITY {
            entries.remove(0);
        }
        entries.push(RecentEntry {
            result: result.clone(),
            saved_at: Utc::now(),
        });
        Ok(())
    }

    async fn update_recent(&self, result: &SearchResult) -> Result<(), ProviderError> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.iter_mut().find(|e| e.result.id == result.id) {
            entry.result = result.clone();
        }
        Ok(())
    }
}
