//! Reconciliation of recents against live provider answers.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;

use crate::search::bundle::ProviderResponse;
use crate::search::recents::RecentsManager;
use crate::search::types::SearchResult;

/// Cross-checks recents hits that were fetched by id against what the live
/// providers returned for the same ids. Where both sides carry an id, the
/// provider's value wins: it replaces the stored copy in the answer, the
/// duplicate is removed from the provider's slot, and a background write
/// refreshes the store. Hits no provider mentioned pass through unchanged.
pub fn reconcile_recents(
    hits: Vec<SearchResult>,
    responses: &mut [ProviderResponse],
    recents: &Arc<dyn RecentsManager>,
) -> Vec<SearchResult> {
    hits.into_iter()
        .map(|hit| {
            let mut fresh: Option<SearchResult> = None;
            for response in responses.iter_mut() {
                if let Some(position) = response.results.iter().position(|r| r.id == hit.id) {
                    let candidate = response.results.remove(position);
                    if fresh.is_none() {
                        fresh = Some(candidate);
                    }
                }
            }
            match fresh {
                Some(fresh) if fresh != hit => {
                    warn!("Stored result {} is stale, refreshing", hit.id);
                    let recents = Arc::clone(recents);
                    let update = fresh.clone();
                    tokio::spawn(async move {
                        if let Err(e) = recents.update_recent(&update).await {
                            warn!("Failed to refresh stored result {}: {}", update.id, e);
                        }
                    });
                    fresh
                }
                Some(fresh) => fresh,
                None => hit,
            }
        })
        .collect()
}

/// Combines the term-matched list with the reconciled list. Term matches lead
/// and win shared ids; reconciled results with new ids are appended after. A
/// term match can therefore still show a value the background repair is about
/// to replace, which the next query picks up.
pub fn merge_sections(
    matched: Vec<SearchResult>,
    reconciled: Vec<SearchResult>,
) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = matched.iter().map(|r| r.id.clone()).collect();
    let mut merged = matched;
    for result in reconciled {
        if seen.insert(result.id.clone()) {
            merged.push(result);
        }
    }
    merged
}

/// Removes the given ids from every slot.
pub fn remove_ids(responses: &mut [ProviderResponse], ids: &HashSet<String>) {
    for response in responses.iter_mut() {
        response.results.retain(|r| !ids.contains(&r.id));
    }
}

/// Drops a result from a later slot when an earlier slot already carries its
/// id. Within-slot duplicates are each provider's own concern.
pub fn dedup_across(responses: &mut [ProviderResponse]) {
    let mut seen: HashSet<String> = HashSet::new();
    for response in responses.iter_mut() {
        response.results.retain(|r| seen.insert(r.id.clone()));
    }
}
