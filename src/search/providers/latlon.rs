use async_trait::async_trait;

use crate::codec::dms;
use crate::search::provider::{Provider, ProviderError};
use crate::search::types::SearchResult;

/// Interprets the query as a latitude/longitude pair in decimal or DMS
/// notation. Purely local, always yields zero or one result.
pub struct LatLonProvider;

#[async_trait]
impl Provider for LatLonProvider {
    fn name(&self) -> &str {
        "lat-lon"
    }

    async fn query(&self, term: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let Ok((latitude, longitude)) = dms::parse_lat_lon(term) else {
            return Ok(Vec::new());
        };
        match SearchResult::lat_lon(latitude, longitude) {
            Ok(result) => Ok(vec![result]),
            Err(_) => Ok(Vec::new()),
        }
    }
}
