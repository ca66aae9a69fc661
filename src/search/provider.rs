use async_trait::async_trait;
use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::search::types::SearchResult;

/// Errors surfaced by providers and the recents store. Carried inside
/// response bundles rather than aborting a whole query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProviderError {
    /// Transport failure before any response arrived.
    Network(String),
    /// Remote service answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body could not be decoded.
    Parse(String),
    /// The recents store failed.
    Store(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Network(message) => write!(f, "Network error: {}", message),
            ProviderError::Api { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            ProviderError::Parse(message) => write!(f, "Parse error: {}", message),
            ProviderError::Store(message) => write!(f, "Store error: {}", message),
        }
    }
}

impl Error for ProviderError {}

/// A single search source. Implementations are queried concurrently and must
/// not panic on malformed input; text a provider cannot interpret yields an
/// empty result list, not an error.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier used to label this provider's slot in the bundle.
    fn name(&self) -> &str;

    /// Run the search term against this source.
    async fn query(&self, term: &str) -> Result<Vec<SearchResult>, ProviderError>;
}
