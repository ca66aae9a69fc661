//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::search::{
    MemoryRecentsManager, Provider, ProviderError, RecentsManager, SearchResult,
};

/// A provider that always returns the same canned results.
pub struct StaticProvider {
    name: String,
    results: Vec<SearchResult>,
}

impl StaticProvider {
    pub fn new(name: &str, results: Vec<SearchResult>) -> Self {
        StaticProvider {
            name: name.to_string(),
            results,
        }
    }
}

#[async_trait]
impl Provider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(&self, _term: &str) -> Result<Vec<SearchResult>, ProviderError> {
        Ok(self.results.clone())
    }
}

/// A provider that always fails with the given error.
pub struct FailingProvider {
    name: String,
    error: ProviderError,
}

impl FailingProvider {
    pub fn new(name: &str, error: ProviderError) -> Self {
        FailingProvider {
            name: name.to_string(),
            error,
        }
    }
}

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(&self, _term: &str) -> Result<Vec<SearchResult>, ProviderError> {
        Err(self.error.clone())
    }
}

/// A recents store whose term search always fails while every other
/// operation works, backed by an in-memory store.
pub struct TermFailingRecentsManager {
    inner: MemoryRecentsManager,
    error: ProviderError,
}

impl TermFailingRecentsManager {
    pub fn new(error: ProviderError) -> Self {
        TermFailingRecentsManager {
            inner: MemoryRecentsManager::new(),
            error,
        }
    }
}

#[async_trait]
impl RecentsManager for TermFailingRecentsManager {
    async fn query(&self, _term: &str) -> Result<Vec<SearchResult>, ProviderError> {
        Err(self.error.clone())
    }

    async fn query_by_id(&self, ids: &[String]) -> Result<Vec<SearchResult>, ProviderError> {
        self.inner.query_by_id(ids).await
    }

    async fn last(&self, count: usize) -> Result<Vec<SearchResult>, ProviderError> {
        self.inner.last(count).await
    }

    async fn save_recent(&self, result: &SearchResult) -> Result<(), ProviderError> {
        self.inner.save_recent(result).await
    }

    async fn update_recent(&self, result: &SearchResult) -> Result<(), ProviderError> {
        self.inner.update_recent(result).await
    }
}
