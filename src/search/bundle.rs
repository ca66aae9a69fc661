use serde::Serialize;

use crate::search::provider::ProviderError;
use crate::search::types::SearchResult;

/// One provider's slot in a bundle: its results, or the error that stood in
/// for them. A slot never carries both.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Name of the provider (or pseudo-source) this slot belongs to.
    pub source: String,
    pub results: Vec<SearchResult>,
    pub error: Option<ProviderError>,
}

impl ProviderResponse {
    pub fn with_results(source: impl Into<String>, results: Vec<SearchResult>) -> Self {
        ProviderResponse {
            source: source.into(),
            results,
            error: None,
        }
    }

    pub fn with_error(source: impl Into<String>, error: ProviderError) -> Self {
        ProviderResponse {
            source: source.into(),
            results: Vec::new(),
            error: Some(error),
        }
    }

    pub fn empty(source: impl Into<String>) -> Self {
        ProviderResponse {
            source: source.into(),
            results: Vec::new(),
            error: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The complete answer to one query: a recents section and the combined
/// live-provider sections. Errors are carried inline per slot so callers can
/// render partial results alongside failures.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchBundle {
    pub recents: ProviderResponse,
    pub remaining: Vec<ProviderResponse>,
}

impl SearchBundle {
    /// Every error in the bundle, recents slot first.
    pub fn errors(&self) -> Vec<&ProviderError> {
        self.recents
            .error
            .iter()
            .chain(self.remaining.iter().filter_map(|r| r.error.as_ref()))
            .collect()
    }

    pub fn recent_results(&self) -> &[SearchResult] {
        &self.recents.results
    }

    /// All live-provider results in slot order.
    pub fn remaining_results(&self) -> Vec<&SearchResult> {
        self.remaining.iter().flat_map(|r| r.results.iter()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::{Point, SearchResult, SpatialReference};

    fn result(id: &str) -> SearchResult {
        SearchResult::new(
            id,
            id,
            "",
            Point::new(0.0, 0.0),
            None,
            SpatialReference::WGS84,
        )
    }

    #[test]
    fn errors_lists_recents_first() {
        let bundle = SearchBundle {
            recents: ProviderResponse::with_error(
                "recents",
                ProviderError::Store("locked".to_string()),
            ),
            remaining: vec![
                ProviderResponse::with_results("grid-reference", vec![result("a")]),
                ProviderResponse::with_error(
                    "open-names",
                    ProviderError::Network("timeout".to_string()),
                ),
            ],
        };
        let errors = bundle.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(*errors[0], ProviderError::Store("locked".to_string()));
        assert_eq!(*errors[1], ProviderError::Network("timeout".to_string()));
    }

    #[test]
    fn remaining_results_flattens_in_slot_order() {
        let bundle = SearchBundle {
            recents: ProviderResponse::empty("none"),
            remaining: vec![
                ProviderResponse::with_results("grid-reference", vec![result("a")]),
                ProviderResponse::empty("lat-lon"),
                ProviderResponse::with_results("open-names", vec![result("b"), result("c")]),
            ],
        };
        let ids: Vec<&str> = bundle
            .remaining_results()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
