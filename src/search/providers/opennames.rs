//! Ordnance Survey Open Names provider.
//!
//! Wire format notes:
//! - entries arrive wrapped as {"GAZETTEER_ENTRY": {...}}
//! - attribute names are SCREAMING_SNAKE_CASE
//! - the bounding box (MBR_*) is optional per entry

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::search::provider::{Provider, ProviderError};
use crate::search::providers::{dedup_by_id, disambiguate_labels};
use crate::search::types::{Envelope, Point, SearchResult, SpatialReference};

const DEFAULT_BASE_URL: &str = "https://api.ordnancesurvey.co.uk/opennames/v1";

// ============================================================================
// Open Names API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct FindResponse {
    #[serde(default)]
    results: Vec<ResultWrapper>,
}

/// Each result is a single-key wrapper around the entry itself.
#[derive(Deserialize, Debug)]
struct ResultWrapper {
    #[serde(rename = "GAZETTEER_ENTRY")]
    entry: Option<GazetteerEntry>,
}

#[derive(Deserialize, Debug)]
struct GazetteerEntry {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "NAME1")]
    name: String,
    #[serde(rename = "GEOMETRY_X")]
    geometry_x: f64,
    #[serde(rename = "GEOMETRY_Y")]
    geometry_y: f64,
    #[serde(rename = "MBR_XMIN")]
    mbr_xmin: Option<f64>,
    #[serde(rename = "MBR_YMIN")]
    mbr_ymin: Option<f64>,
    #[serde(rename = "MBR_XMAX")]
    mbr_xmax: Option<f64>,
    #[serde(rename = "MBR_YMAX")]
    mbr_ymax: Option<f64>,
    #[serde(rename = "POSTCODE_DISTRICT")]
    postcode_district: Option<String>,
    #[serde(rename = "POPULATED_PLACE")]
    populated_place: Option<String>,
    #[serde(rename = "DISTRICT_BOROUGH")]
    district_borough: Option<String>,
    #[serde(rename = "COUNTY_UNITARY")]
    county_unitary: Option<String>,
    #[serde(rename = "REGION")]
    region: Option<String>,
    #[serde(rename = "COUNTRY")]
    country: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Builds the descriptive context line from an entry's administrative
/// hierarchy: district/borough, populated place, county/unitary, region,
/// country, postcode district, with noisy official names shortened and
/// consecutive repeats collapsed.
fn entry_context(entry: &GazetteerEntry) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(district) = &entry.district_borough {
        parts.push(district.replacen("City and County of the City of London", "London", 1));
    }
    if let Some(populated) = &entry.populated_place {
        parts.push(populated.replace("City of", "").trim().to_string());
    }
    if let Some(county) = &entry.county_unitary {
        let county = county.replace("Greater London", "London");
        parts.push(county.replace("City of ", "").trim().to_string());
    }
    if let Some(region) = &entry.region {
        parts.push(region.clone());
    }
    if let Some(country) = &entry.country {
        parts.push(country.clone());
    }
    if let Some(postcode) = &entry.postcode_district {
        parts.push(postcode.clone());
    }

    let mut context = String::new();
    let mut previous: Option<&str> = None;
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if previous == Some(part.as_str()) {
            continue;
        }
        if !context.is_empty() {
            context.push_str(", ");
        }
        context.push_str(part);
        previous = Some(part.as_str());
    }
    context
}

fn entry_to_result(entry: &GazetteerEntry) -> SearchResult {
    let envelope = match (entry.mbr_xmin, entry.mbr_ymin, entry.mbr_xmax, entry.mbr_ymax) {
        (Some(min_x), Some(min_y), Some(max_x), Some(max_y)) => {
            Some(Envelope::new(min_x, min_y, max_x, max_y))
        }
        _ => None,
    };
    SearchResult::new(
        entry.id.clone(),
        entry.name.clone(),
        entry_context(entry),
        Point::new(entry.geometry_x, entry.geometry_y),
        envelope,
        SpatialReference::BRITISH_NATIONAL_GRID,
    )
}

fn response_to_results(response: FindResponse) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = response
        .results
        .iter()
        .filter_map(|wrapper| match &wrapper.entry {
            Some(entry) => Some(entry_to_result(entry)),
            None => {
                warn!("Open Names result without a gazetteer entry, skipping");
                None
            }
        })
        .collect();
    results = dedup_by_id(results);
    disambiguate_labels(&mut results);
    results
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Remote gazetteer provider backed by the Open Names `find` endpoint.
pub struct OpennamesProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpennamesProvider {
    /// Creates a new Open Names provider.
    ///
    /// # Arguments
    /// * `api_key` - Open Names API key
    /// * `base_url` - Optional custom base URL (defaults to the public API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    async fn send_request(&self, term: &str) -> Result<FindResponse, ProviderError> {
        let response = self
            .client
            .get(format!("{}/find", self.base_url))
            .query(&[("query", term), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Open Names response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Open Names API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<FindResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Provider for OpennamesProvider {
    fn name(&self) -> &str {
        "open-names"
    }

    async fn query(&self, term: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let response = self.send_request(term).await?;
        Ok(response_to_results(response))
    }
}
