use async_trait::async_trait;

use crate::codec::grid;
use crate::search::provider::{Provider, ProviderError};
use crate::search::types::{Envelope, SearchResult};

/// Interprets the query as an Ordnance Survey grid reference. Purely local,
/// always yields zero or one result.
pub struct GridRefProvider;

#[async_trait]
impl Provider for GridRefProvider {
    fn name(&self) -> &str {
        "grid-reference"
    }

    async fn query(&self, term: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let Some(grid_ref) = grid::decode(term) else {
            return Ok(Vec::new());
        };
        let envelope = Envelope::new(
            grid_ref.easting as f64,
            grid_ref.northing as f64,
            (grid_ref.easting + grid_ref.cell_size) as f64,
            (grid_ref.northing + grid_ref.cell_size) as f64,
        );
        Ok(vec![SearchResult::grid_reference(
            &grid_ref.name,
            grid_ref.easting,
            grid_ref.northing,
            envelope,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::SpatialReference;

    #[tokio::test]
    async fn valid_reference_yields_one_result() {
        let results = GridRefProvider.query("TL 032 386").await.unwrap();
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.id, "GridRef: TL 032 386");
        assert_eq!(result.context, "Easting: 503200  Northing: 238600");
        assert_eq!(
            result.envelope,
            Some(Envelope::new(503_200.0, 238_600.0, 503_300.0, 238_700.0))
        );
        assert_eq!(
            result.spatial_reference,
            SpatialReference::BRITISH_NATIONAL_GRID
        );
    }

    #[tokio::test]
    async fn envelope_spans_one_cell() {
        let results = GridRefProvider.query("SU41").await.unwrap();
        assert_eq!(
            results[0].envelope,
            Some(Envelope::new(440_000.0, 110_000.0, 450_000.0, 120_000.0))
        );
    }

    #[tokio::test]
    async fn non_reference_text_yields_nothing() {
        assert!(GridRefProvider.query("Southampton").await.unwrap().is_empty());
        assert!(GridRefProvider.query("SU123").await.unwrap().is_empty());
        assert!(GridRefProvider.query("").await.unwrap().is_empty());
    }
}
