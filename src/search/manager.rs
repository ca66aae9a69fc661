//! Query orchestration across providers and the recents store.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use log::{info, warn};

use crate::search::bundle::{ProviderResponse, SearchBundle};
use crate::search::merge::{dedup_across, merge_sections, reconcile_recents, remove_ids};
use crate::search::provider::Provider;
use crate::search::providers::{
    AddressesProvider, GridRefProvider, LatLonProvider, OpennamesProvider,
};
use crate::search::recents::RecentsManager;

/// Name of the pseudo-source the recents section reports when a store is
/// configured.
const RECENTS_SOURCE: &str = "recents";
/// Name the recents section reports when no store is configured.
const NO_RECENTS_SOURCE: &str = "none";

/// Fans one query out to every configured provider plus the recents store
/// and assembles the combined bundle. One failing source never fails the
/// query; its slot carries the error instead.
pub struct SearchManager {
    providers: Vec<Arc<dyn Provider>>,
    recents: Option<Arc<dyn RecentsManager>>,
}

impl SearchManager {
    pub fn builder() -> SearchManagerBuilder {
        SearchManagerBuilder::new()
    }

    /// The configured recents store, if any. Selections are saved through
    /// this handle so later queries can surface them.
    pub fn recents(&self) -> Option<&Arc<dyn RecentsManager>> {
        self.recents.as_ref()
    }

    /// Runs the query to completion: every provider is awaited before the
    /// bundle is assembled, so the answer is whole, never incremental.
    pub async fn query(&self, term: &str) -> SearchBundle {
        info!("Searching {} providers for: {}", self.providers.len(), term);

        let futures = self.providers.iter().map(|provider| async move {
            match provider.query(term).await {
                Ok(results) => ProviderResponse::with_results(provider.name(), results),
                Err(e) => {
                    warn!("Provider {} failed: {}", provider.name(), e);
                    ProviderResponse::with_error(provider.name(), e)
                }
            }
        });
        let mut responses: Vec<ProviderResponse> = join_all(futures).await;

        let recents = match &self.recents {
            Some(recents) => self.recents_section(term, recents, &mut responses).await,
            None => ProviderResponse::empty(NO_RECENTS_SOURCE),
        };

        let recent_ids: HashSet<String> =
            recents.results.iter().map(|r| r.id.clone()).collect();
        remove_ids(&mut responses, &recent_ids);
        dedup_across(&mut responses);

        SearchBundle {
            recents,
            remaining: responses,
        }
    }

    /// Builds the recents slot: stored entries matching the term, preceded
    /// by reconciled provider results the store already knows about.
    async fn recents_section(
        &self,
        term: &str,
        recents: &Arc<dyn RecentsManager>,
        responses: &mut [ProviderResponse],
    ) -> ProviderResponse {
        let ids: Vec<String> = responses
            .iter()
            .flat_map(|r| r.results.iter().map(|result| result.id.clone()))
            .collect();

        let by_id = async {
            if ids.is_empty() {
                Ok(Vec::new())
            } else {
                recents.query_by_id(&ids).await
            }
        };
        let (by_id, by_term) = tokio::join!(by_id, recents.query(term));

        let hits = match by_id {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Recents id lookup failed: {}", e);
                Vec::new()
            }
        };
        let reconciled = reconcile_recents(hits, responses, recents);

        match by_term {
            Ok(matched) => ProviderResponse::with_results(
                RECENTS_SOURCE,
                merge_sections(matched, reconciled),
            ),
            Err(e) => {
                warn!("Recents search failed: {}", e);
                ProviderResponse::with_error(RECENTS_SOURCE, e)
            }
        }
    }
}

/// Assembles a [`SearchManager`]. Starts from the two local coordinate
/// providers; callers add remote providers and a recents store as needed.
pub struct SearchManagerBuilder {
    providers: Vec<Arc<dyn Provider>>,
    recents: Option<Arc<dyn RecentsManager>>,
}

impl SearchManagerBuilder {
    pub fn new() -> Self {
        SearchManagerBuilder {
            providers: vec![Arc::new(GridRefProvider), Arc::new(LatLonProvider)],
            recents: None,
        }
    }

    /// Replaces the provider list outright.
    pub fn providers(mut self, providers: Vec<Arc<dyn Provider>>) -> Self {
        self.providers = providers;
        self
    }

    pub fn add_provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn add_open_names(self, api_key: String, base_url: Option<String>) -> Self {
        self.add_provider(Arc::new(OpennamesProvider::new(api_key, base_url)))
    }

    pub fn add_places(self, api_key: String, base_url: Option<String>) -> Self {
        self.add_provider(Arc::new(AddressesProvider::new(api_key, base_url)))
    }

    pub fn recents_manager(mut self, recents: Arc<dyn RecentsManager>) -> Self {
        self.recents = Some(recents);
        self
    }

    pub fn build(self) -> SearchManager {
        SearchManager {
            providers: self.providers,
            recents: self.recents,
        }
    }
}

impl Default for SearchManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
